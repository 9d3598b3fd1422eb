//! Behavioural tests for TOML document resolution.
//!
//! Documents are written into temporary directories and registered as the
//! call's default file through `TomlSource::with_file`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow, ensure};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;
use wellspring::{LoadError, Loader, Settings, TomlSource};

#[derive(Debug, Serialize, Deserialize, Settings, PartialEq, Eq)]
struct ServerConfig {
    #[setting(toml(key = "server.port"))]
    port: u16,
    #[setting(toml(key = "server.host"))]
    host: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Settings, PartialEq, Eq)]
struct InferredConfig {
    #[setting(toml)]
    port: u16,
}

fn document(content: &str) -> Result<(TempDir, PathBuf)> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("app.toml");
    fs::write(&path, content)?;
    Ok((dir, path))
}

fn load_from<T: Settings>(path: &Path) -> Result<T, LoadError> {
    Loader::new().sources([TomlSource::with_file(path)]).load()
}

#[test]
fn dotted_keys_walk_nested_tables() -> Result<()> {
    let (_dir, path) = document("[server]\nport = 8080\nhost = \"example.org\"\n")?;
    let config: ServerConfig = load_from(&path).map_err(|err| anyhow!(err))?;
    ensure!(
        config
            == ServerConfig {
                port: 8080,
                host: Some("example.org".to_owned()),
            },
        "resolved {config:?}"
    );
    Ok(())
}

#[test]
fn missing_segments_resolve_nothing() -> Result<()> {
    let (_dir, path) = document("[server]\nport = 8080\n")?;
    let config: ServerConfig = load_from(&path).map_err(|err| anyhow!(err))?;
    ensure!(config.host.is_none(), "resolved {:?}", config.host);
    Ok(())
}

#[test]
fn unreadable_documents_are_hard_errors() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let absent = dir.path().join("absent.toml");
    let err = match load_from::<ServerConfig>(&absent) {
        Ok(config) => return Err(anyhow!("expected failure, resolved {config:?}")),
        Err(err) => err,
    };
    let LoadError::Read { path, .. } = &err else {
        return Err(anyhow!("unexpected error: {err}"));
    };
    ensure!(*path == absent, "errored for {}", path.display());
    Ok(())
}

#[test]
fn unparsable_documents_are_hard_errors() -> Result<()> {
    let (_dir, path) = document("server = = 8080\n")?;
    let err = match load_from::<ServerConfig>(&path) {
        Ok(config) => return Err(anyhow!("expected failure, resolved {config:?}")),
        Err(err) => err,
    };
    ensure!(matches!(&err, LoadError::Parse { .. }), "unexpected error: {err}");
    Ok(())
}

#[test]
fn lookups_without_any_file_are_rejected() -> Result<()> {
    let err = match Loader::new()
        .sources([TomlSource::new()])
        .load::<ServerConfig>()
    {
        Ok(config) => return Err(anyhow!("expected failure, resolved {config:?}")),
        Err(err) => err,
    };
    ensure!(matches!(&err, LoadError::MissingFile { .. }), "unexpected error: {err}");
    ensure!(
        err.to_string()
            == "Toml instance for 'port' supplies no file and no default file is configured",
        "unexpected message: {err}"
    );
    Ok(())
}

#[test]
fn inferred_keys_use_the_field_name() -> Result<()> {
    let (_dir, path) = document("port = 4242\n")?;
    let config: InferredConfig = Loader::new()
        .sources([TomlSource::with_file(&path)])
        .infer_names(true)
        .load()
        .map_err(|err| anyhow!(err))?;
    ensure!(config.port == 4242, "resolved {}", config.port);
    Ok(())
}

#[test]
fn bare_lookups_without_inference_are_rejected() -> Result<()> {
    let (_dir, path) = document("port = 4242\n")?;
    let err = match load_from::<InferredConfig>(&path) {
        Ok(config) => return Err(anyhow!("expected failure, resolved {config:?}")),
        Err(err) => err,
    };
    ensure!(matches!(&err, LoadError::MissingName { .. }), "unexpected error: {err}");
    ensure!(
        err.to_string()
            == "Toml instance for 'port' supplies no key and name inference is disabled",
        "unexpected message: {err}"
    );
    Ok(())
}
