//! Behavioural tests for environment-variable resolution.
//!
//! Most cases inject a variable snapshot through `EnvSource::with_vars` so
//! they stay hermetic under parallel test runs; the default-loader case
//! mutates the process environment under a guard and runs serially.

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use serde::{Deserialize, Serialize};
use serial_test::serial;
use wellspring::{ConstructError, EnvSource, LoadError, Loader, Settings, load_settings};

#[derive(Debug, Serialize, Deserialize, Settings, PartialEq, Eq)]
#[setting(flavor = "plain")]
struct ServiceConfig {
    #[setting(env("SERVICE_PORT", "PORT"))]
    port: u16,
    #[setting(env("SERVICE_NAME"))]
    #[setting(default = String::from("svc"))]
    name: String,
}

#[derive(Debug, Serialize, Deserialize, Settings, PartialEq, Eq)]
#[setting(flavor = "plain")]
struct InferredConfig {
    #[setting(env)]
    port: u16,
}

#[derive(Debug, Serialize, Deserialize, Settings, PartialEq, Eq)]
#[setting(flavor = "plain")]
struct DatabaseConfig {
    #[setting(env("HOST"))]
    host: String,
}

#[derive(Debug, Serialize, Deserialize, Settings, PartialEq, Eq)]
#[setting(flavor = "plain")]
struct AppConfig {
    #[setting(nested)]
    database: DatabaseConfig,
}

fn injected(vars: &[(&str, &str)]) -> Loader {
    Loader::new().sources([EnvSource::with_vars(vars.iter().copied())])
}

#[rstest]
#[case::first_candidate_wins(&[("SERVICE_PORT", "8080"), ("PORT", "9090")], 8080)]
#[case::later_candidates_fill_in(&[("PORT", "9090")], 9090)]
#[case::surrounding_whitespace_is_trimmed(&[("SERVICE_PORT", " 8080 ")], 8080)]
fn candidates_resolve_in_declaration_order(
    #[case] vars: &[(&str, &str)],
    #[case] expected: u16,
) -> Result<()> {
    let config: ServiceConfig = injected(vars).load().map_err(|err| anyhow!(err))?;
    ensure!(config.port == expected, "resolved {}", config.port);
    Ok(())
}

#[test]
fn declared_defaults_fill_unresolved_fields() -> Result<()> {
    let config: ServiceConfig = injected(&[("SERVICE_PORT", "8080")])
        .load()
        .map_err(|err| anyhow!(err))?;
    ensure!(config.name == "svc", "resolved {}", config.name);
    Ok(())
}

#[test]
fn missing_required_fields_fail_construction() -> Result<()> {
    let err = match injected(&[("UNRELATED", "value")]).load::<ServiceConfig>() {
        Ok(config) => return Err(anyhow!("expected failure, resolved {config:?}")),
        Err(err) => err,
    };
    ensure!(
        matches!(
            &err,
            LoadError::Construction {
                source: ConstructError::MissingField {
                    record: "ServiceConfig",
                    field: "port",
                },
                ..
            }
        ),
        "unexpected error: {err}"
    );
    Ok(())
}

#[test]
fn uncoercible_values_are_dropped_softly() -> Result<()> {
    let err = match injected(&[("SERVICE_PORT", "eight")]).load::<ServiceConfig>() {
        Ok(config) => return Err(anyhow!("expected failure, resolved {config:?}")),
        Err(err) => err,
    };
    ensure!(
        matches!(
            &err,
            LoadError::Construction {
                source: ConstructError::MissingField { field: "port", .. },
                ..
            }
        ),
        "unexpected error: {err}"
    );
    Ok(())
}

#[test]
fn inferred_names_upper_case_the_field() -> Result<()> {
    let config: InferredConfig = injected(&[("PORT", "7070")])
        .infer_names(true)
        .load()
        .map_err(|err| anyhow!(err))?;
    ensure!(config.port == 7070, "resolved {}", config.port);
    Ok(())
}

#[test]
fn bare_sources_without_inference_are_rejected() -> Result<()> {
    let err = match injected(&[("PORT", "7070")]).load::<InferredConfig>() {
        Ok(config) => return Err(anyhow!("expected failure, resolved {config:?}")),
        Err(err) => err,
    };
    ensure!(matches!(&err, LoadError::MissingName { .. }), "unexpected error: {err}");
    ensure!(
        err.to_string()
            == "Env instance for 'port' supplies no env_var and name inference is disabled",
        "unexpected message: {err}"
    );
    Ok(())
}

#[test]
fn delimited_lookups_flatten_the_nesting_path() -> Result<()> {
    let config: AppConfig = injected(&[("DATABASE_HOST", "db.internal")])
        .delimited()
        .load()
        .map_err(|err| anyhow!(err))?;
    ensure!(config.database.host == "db.internal", "resolved {}", config.database.host);
    Ok(())
}

#[test]
fn explicit_delimiters_replace_the_default_join() -> Result<()> {
    let config: AppConfig = injected(&[("DATABASE__HOST", "db.internal")])
        .nested_delimiter("__")
        .load()
        .map_err(|err| anyhow!(err))?;
    ensure!(config.database.host == "db.internal", "resolved {}", config.database.host);
    Ok(())
}

#[test]
fn undelimited_lookups_use_the_local_name() -> Result<()> {
    let config: AppConfig = injected(&[("HOST", "local")])
        .load()
        .map_err(|err| anyhow!(err))?;
    ensure!(config.database.host == "local", "resolved {}", config.database.host);
    Ok(())
}

#[test]
#[serial]
fn the_default_loader_reads_the_process_environment() -> Result<()> {
    let _guards = test_helpers::env::set_vars([
        ("SERVICE_PORT", "4242"),
        ("SERVICE_NAME", "edge"),
    ]);
    let config: ServiceConfig = load_settings().map_err(|err| anyhow!(err))?;
    ensure!(
        config
            == ServiceConfig {
                port: 4242,
                name: "edge".to_owned(),
            },
        "resolved {config:?}"
    );
    Ok(())
}
