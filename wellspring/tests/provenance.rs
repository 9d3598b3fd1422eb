//! Behavioural tests for resolution-history reporting.
//!
//! History is only tracked when enabled for the call, and it is surfaced
//! verbatim on construction failure.

use anyhow::{Result, anyhow, ensure};
use serde::{Deserialize, Serialize};
use wellspring::{ConstructError, EnvSource, LoadError, Loader, Settings};

#[derive(Debug, Serialize, Deserialize, Settings, PartialEq, Eq)]
#[setting(flavor = "plain")]
struct StrictConfig {
    #[setting(env("STRICT_PORT", "FALLBACK_PORT"))]
    port: u16,
    #[setting(env("STRICT_NAME"))]
    name: String,
}

fn injected(vars: &[(&str, &str)]) -> Loader {
    Loader::new().sources([EnvSource::with_vars(vars.iter().copied())])
}

fn failure(loader: &Loader) -> Result<(ConstructError, Option<String>)> {
    match loader.load::<StrictConfig>() {
        Ok(config) => Err(anyhow!("expected failure, resolved {config:?}")),
        Err(LoadError::Construction { source, provenance }) => Ok((source, provenance)),
        Err(err) => Err(anyhow!("unexpected error: {err}")),
    }
}

#[test]
fn failures_carry_the_rendered_history() -> Result<()> {
    let (source, provenance) = failure(&injected(&[("FALLBACK_PORT", "9090")]).emit_history(true))?;
    ensure!(
        matches!(source, ConstructError::MissingField { field: "name", .. }),
        "unexpected source: {source}"
    );
    let expected = "\
port:
 - Used `Env` to read 'STRICT_PORT', found None. Skipping.
 - Used `Env` to read 'FALLBACK_PORT', found '9090'.

name:
 - Used `Env` to read 'STRICT_NAME', found None. Skipping.
";
    ensure!(
        provenance.as_deref() == Some(expected),
        "unexpected history: {provenance:?}"
    );
    Ok(())
}

#[test]
fn history_is_absent_unless_enabled() -> Result<()> {
    let (source, provenance) = failure(&injected(&[("FALLBACK_PORT", "9090")]))?;
    ensure!(
        matches!(source, ConstructError::MissingField { field: "name", .. }),
        "unexpected source: {source}"
    );
    ensure!(provenance.is_none(), "unexpected history: {provenance:?}");
    Ok(())
}

#[test]
fn successful_loads_return_no_history() -> Result<()> {
    let config: StrictConfig = injected(&[("STRICT_PORT", "8080"), ("STRICT_NAME", "edge")])
        .emit_history(true)
        .load()
        .map_err(|err| anyhow!(err))?;
    ensure!(
        config
            == StrictConfig {
                port: 8080,
                name: "edge".to_owned(),
            },
        "resolved {config:?}"
    );
    Ok(())
}
