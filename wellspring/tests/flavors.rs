//! Behavioural tests for record construction flavors.
//!
//! The derive generates the table-driven flavors; the builder flavor
//! implements the runtime trait by hand the way builder-pattern types do.

use anyhow::{Result, anyhow, ensure};
use serde::{Deserialize, Serialize};
use wellspring::{
    ConstructError, EnvSource, FieldShape, LoadError, Loader, Markers, RecordShape, ScalarKind,
    Settings, Source, TypeSpec, toml,
};

#[derive(Debug, Serialize, Deserialize, Settings, PartialEq, Eq)]
#[setting(flavor = "plain")]
struct PlainConfig {
    #[setting(env("PLAIN_PORT"))]
    port: u16,
    #[setting(skip)]
    #[setting(default = 7)]
    revision: u32,
}

#[derive(Debug, Serialize, Deserialize, Settings, PartialEq, Eq)]
struct SchemaConfig {
    #[setting(env("SCHEMA_PORT"))]
    port: u16,
    #[setting(env("SCHEMA_HOST"))]
    host: String,
}

#[derive(Debug, Serialize, Deserialize, Settings, PartialEq, Eq)]
#[setting(flavor = "serde_defaults")]
struct DefaultedConfig {
    #[setting(env("DEF_PORT"))]
    #[setting(default = 8080)]
    port: u16,
    #[setting(env("DEF_LABEL"))]
    #[setting(default = String::from("fallback"))]
    label: String,
}

#[derive(Debug, Serialize, Deserialize, Settings, PartialEq, Eq)]
#[setting(flavor = "positional")]
struct SlotConfig {
    #[setting(env("SLOT_NAME"))]
    name: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct PoolConfig {
    size: u32,
    label: String,
}

#[derive(Debug, Default)]
struct PoolConfigBuilder {
    size: Option<u32>,
    label: Option<String>,
}

impl PoolConfigBuilder {
    const fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    fn label(mut self, label: String) -> Self {
        self.label = Some(label);
        self
    }

    fn build(self) -> Result<PoolConfig, String> {
        let size = self
            .size
            .ok_or_else(|| "pool size is required".to_owned())?;
        Ok(PoolConfig {
            size,
            label: self.label.unwrap_or_default(),
        })
    }
}

fn pool_fields() -> Vec<FieldShape> {
    vec![
        FieldShape {
            name: "size",
            ty: TypeSpec::Scalar(ScalarKind::Integer),
            annotations: vec![Source::Env(EnvSource::new().name("POOL_SIZE"))],
        },
        FieldShape {
            name: "label",
            ty: TypeSpec::Scalar(ScalarKind::String),
            annotations: vec![Source::Env(EnvSource::new().name("POOL_LABEL"))],
        },
    ]
}

fn construct_pool(table: toml::value::Table) -> Result<toml::Value, ConstructError> {
    let config = PoolConfig::from_table(table)?;
    toml::Value::try_from(config).map_err(|err| ConstructError::reserialize("PoolConfig", err))
}

impl Settings for PoolConfig {
    fn shape() -> &'static RecordShape {
        static SHAPE: RecordShape = RecordShape {
            name: "PoolConfig",
            markers: Markers {
                field_table: false,
                schema: false,
                positional: false,
                builder: true,
            },
            fields: pool_fields,
            construct: construct_pool,
        };
        &SHAPE
    }

    fn from_table(mut table: toml::value::Table) -> Result<Self, ConstructError> {
        let mut builder = PoolConfigBuilder::default();
        if let Some(value) = table.remove("size") {
            let size = value
                .try_into()
                .map_err(|err| ConstructError::invalid_value("PoolConfig", "size", err))?;
            builder = builder.size(size);
        }
        if let Some(value) = table.remove("label") {
            let label = value
                .try_into()
                .map_err(|err| ConstructError::invalid_value("PoolConfig", "label", err))?;
            builder = builder.label(label);
        }
        builder
            .build()
            .map_err(|message| ConstructError::builder("PoolConfig", message))
    }
}

fn injected(vars: &[(&str, &str)]) -> Loader {
    Loader::new().sources([EnvSource::with_vars(vars.iter().copied())])
}

fn table(entries: Vec<(&str, toml::Value)>) -> toml::value::Table {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value))
        .collect()
}

#[test]
fn plain_records_coerce_and_backfill_declared_defaults() -> Result<()> {
    let config: PlainConfig = injected(&[("PLAIN_PORT", "8080")])
        .load()
        .map_err(|err| anyhow!(err))?;
    ensure!(
        config
            == PlainConfig {
                port: 8080,
                revision: 7,
            },
        "resolved {config:?}"
    );
    Ok(())
}

#[test]
fn plain_construction_names_the_rejecting_field() -> Result<()> {
    let err = match PlainConfig::from_table(table(vec![("port", toml::Value::Boolean(true))])) {
        Ok(config) => return Err(anyhow!("expected failure, resolved {config:?}")),
        Err(err) => err,
    };
    ensure!(
        matches!(
            &err,
            ConstructError::InvalidValue {
                record: "PlainConfig",
                field: "port",
                ..
            }
        ),
        "unexpected error: {err}"
    );
    Ok(())
}

#[test]
fn schema_records_deserialize_structured_tables() -> Result<()> {
    let config = SchemaConfig::from_table(table(vec![
        ("port", toml::Value::Integer(8080)),
        ("host", toml::Value::String("api".to_owned())),
    ]))
    .map_err(|err| anyhow!(err))?;
    ensure!(
        config
            == SchemaConfig {
                port: 8080,
                host: "api".to_owned(),
            },
        "resolved {config:?}"
    );
    Ok(())
}

#[test]
fn schema_records_pass_raw_text_through_uncoerced() -> Result<()> {
    // The schema flavor delegates coercion to serde, which rejects the raw
    // "8080" text when deserializing the numeric field.
    let err = match injected(&[("SCHEMA_PORT", "8080"), ("SCHEMA_HOST", "api")])
        .load::<SchemaConfig>()
    {
        Ok(config) => return Err(anyhow!("expected failure, resolved {config:?}")),
        Err(err) => err,
    };
    ensure!(
        matches!(
            &err,
            LoadError::Construction {
                source: ConstructError::Deserialize {
                    record: "SchemaConfig",
                    ..
                },
                ..
            }
        ),
        "unexpected error: {err}"
    );
    Ok(())
}

#[test]
fn defaulted_schemas_backfill_absent_keys() -> Result<()> {
    let config: DefaultedConfig = injected(&[]).load().map_err(|err| anyhow!(err))?;
    ensure!(
        config
            == DefaultedConfig {
                port: 8080,
                label: "fallback".to_owned(),
            },
        "resolved {config:?}"
    );
    Ok(())
}

#[test]
fn resolved_values_override_declared_defaults() -> Result<()> {
    let config: DefaultedConfig = injected(&[("DEF_PORT", "9090")])
        .load()
        .map_err(|err| anyhow!(err))?;
    ensure!(
        config
            == DefaultedConfig {
                port: 9090,
                label: "fallback".to_owned(),
            },
        "resolved {config:?}"
    );
    Ok(())
}

#[test]
fn positional_records_resolve_declared_slots() -> Result<()> {
    let config: SlotConfig = injected(&[("SLOT_NAME", "edge")])
        .load()
        .map_err(|err| anyhow!(err))?;
    ensure!(config.name == "edge", "resolved {}", config.name);
    Ok(())
}

#[test]
fn positional_records_reject_undeclared_slots() -> Result<()> {
    let err = match SlotConfig::from_table(table(vec![
        ("name", toml::Value::String("edge".to_owned())),
        ("stray", toml::Value::String("noise".to_owned())),
    ])) {
        Ok(config) => return Err(anyhow!("expected failure, resolved {config:?}")),
        Err(err) => err,
    };
    let ConstructError::UnexpectedField { record, field } = &err else {
        return Err(anyhow!("unexpected error: {err}"));
    };
    ensure!(*record == "SlotConfig", "errored for `{record}`");
    ensure!(field == "stray", "errored for '{field}'");
    Ok(())
}

#[test]
fn builder_records_resolve_through_their_builder() -> Result<()> {
    let config: PoolConfig = injected(&[("POOL_SIZE", "16"), ("POOL_LABEL", "workers")])
        .load()
        .map_err(|err| anyhow!(err))?;
    ensure!(
        config
            == PoolConfig {
                size: 16,
                label: "workers".to_owned(),
            },
        "resolved {config:?}"
    );
    Ok(())
}

#[test]
fn builder_failures_carry_the_builder_message() -> Result<()> {
    let err = match injected(&[("POOL_LABEL", "workers")]).load::<PoolConfig>() {
        Ok(config) => return Err(anyhow!("expected failure, resolved {config:?}")),
        Err(err) => err,
    };
    let LoadError::Construction {
        source: ConstructError::Builder { record, message },
        ..
    } = &err
    else {
        return Err(anyhow!("unexpected error: {err}"));
    };
    ensure!(*record == "PoolConfig", "errored for `{record}`");
    ensure!(message == "pool size is required", "unexpected message: {message}");
    Ok(())
}
