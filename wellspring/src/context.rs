//! Resolution contexts and per-call session state.
//!
//! A [`Session`] owns everything that accumulates across one top-level load:
//! the shared per-source caches and the optional provenance log. A
//! [`Context`] is one node in the record-nesting tree; entering a field
//! reborrows the same session so state and diagnostics flow through the
//! whole recursion.

use toml::Value;

use crate::source::{Source, SourceKind};
use crate::source::env::EnvState;
use crate::source::secret::SecretState;
use crate::source::toml_doc::TomlState;

/// Shared state and diagnostics for one top-level resolution call.
pub(crate) struct Session {
    state: SessionState,
    provenance: Option<ProvenanceLog>,
}

/// Per-source shared memo objects, present only for registered kinds.
#[derive(Default)]
pub(crate) struct SessionState {
    pub(crate) env: Option<EnvState>,
    pub(crate) secret: Option<SecretState>,
    pub(crate) toml: Option<TomlState>,
}

impl Session {
    pub(crate) fn new(track_provenance: bool) -> Self {
        Self {
            state: SessionState::default(),
            provenance: track_provenance.then(ProvenanceLog::default),
        }
    }

    /// Initialises the shared state for `source`'s kind.
    ///
    /// Registering a second source of the same kind replaces the earlier
    /// state, so the last registration's options win.
    pub(crate) fn register(&mut self, source: &Source) {
        match source {
            Source::Env(env) => self.state.env = Some(env.init_state()),
            Source::Secret(secret) => self.state.secret = Some(secret.init_state()),
            Source::Toml(toml_source) => self.state.toml = Some(toml_source.init_state()),
        }
    }

    pub(crate) const fn is_registered(&self, kind: SourceKind) -> bool {
        match kind {
            SourceKind::Env => self.state.env.is_some(),
            SourceKind::Secret => self.state.secret.is_some(),
            SourceKind::Toml => self.state.toml.is_some(),
        }
    }

    pub(crate) fn render_provenance(&self) -> Option<String> {
        self.provenance.as_ref().map(ProvenanceLog::render)
    }
}

/// One node of the resolution tree.
pub(crate) struct Context<'a> {
    path: Vec<&'static str>,
    current: Option<&'static str>,
    delimiter: Option<&'a str>,
    infer_names: bool,
    session: &'a mut Session,
}

impl<'a> Context<'a> {
    pub(crate) fn root(
        session: &'a mut Session,
        delimiter: Option<&'a str>,
        infer_names: bool,
    ) -> Self {
        Self {
            path: Vec::new(),
            current: None,
            delimiter,
            infer_names,
            session,
        }
    }

    /// Forks a child context for the field `name`.
    ///
    /// The child's path extends the parent's with the parent's own field
    /// name; the session is reborrowed, not copied.
    pub(crate) fn enter(&mut self, name: &'static str) -> Context<'_> {
        let mut path = self.path.clone();
        if let Some(current) = self.current {
            path.push(current);
        }
        Context {
            path,
            current: Some(name),
            delimiter: self.delimiter,
            infer_names: self.infer_names,
            session: &mut *self.session,
        }
    }

    /// Flattens `local` into a single lookup key using the delimiter.
    ///
    /// With delimiting disabled the local name is returned unchanged.
    pub(crate) fn qualified_name(&self, local: &str) -> String {
        self.delimiter.map_or_else(
            || local.to_owned(),
            |delimiter| {
                let mut parts: Vec<&str> = self.path.clone();
                parts.push(local);
                parts.join(delimiter)
            },
        )
    }

    /// The dotted path of this node, used for provenance keys and errors.
    pub(crate) fn dotted(&self) -> String {
        let mut parts: Vec<&str> = self.path.clone();
        if let Some(current) = self.current {
            parts.push(current);
        }
        parts.join(".")
    }

    /// Appends a provenance line for one lookup attempt.
    ///
    /// No-op when provenance tracking is disabled for the session.
    pub(crate) fn record(&mut self, kind: SourceKind, name: &str, value: Option<&Value>) {
        if self.session.provenance.is_none() {
            return;
        }
        let message = value.map_or_else(
            || format!("Used `{kind}` to read '{name}', found None. Skipping."),
            |found| {
                format!(
                    "Used `{kind}` to read '{name}', found '{}'.",
                    display_value(found)
                )
            },
        );
        let key = self.dotted();
        if let Some(log) = self.session.provenance.as_mut() {
            log.record(key, message);
        }
    }

    pub(crate) const fn infer_names(&self) -> bool {
        self.infer_names
    }

    pub(crate) const fn current(&self) -> Option<&'static str> {
        self.current
    }

    pub(crate) const fn is_registered(&self, kind: SourceKind) -> bool {
        self.session.is_registered(kind)
    }

    pub(crate) const fn env_state(&self) -> Option<&EnvState> {
        self.session.state.env.as_ref()
    }

    pub(crate) const fn secret_state_mut(&mut self) -> Option<&mut SecretState> {
        self.session.state.secret.as_mut()
    }

    pub(crate) const fn toml_state_mut(&mut self) -> Option<&mut TomlState> {
        self.session.state.toml.as_mut()
    }

    pub(crate) fn default_toml_file(&self) -> Option<std::path::PathBuf> {
        self.session
            .state
            .toml
            .as_ref()
            .and_then(TomlState::default_file)
    }
}

/// Ordered provenance blocks keyed by dotted field path.
#[derive(Debug, Default)]
pub(crate) struct ProvenanceLog {
    blocks: Vec<(String, Vec<String>)>,
}

impl ProvenanceLog {
    fn record(&mut self, key: String, message: String) {
        if let Some((_, messages)) = self.blocks.iter_mut().find(|(path, _)| *path == key) {
            messages.push(message);
        } else {
            self.blocks.push((key, vec![message]));
        }
    }

    /// Renders the log: one block per path, blocks separated by a blank
    /// line, trailing newline after the final block.
    pub(crate) fn render(&self) -> String {
        let mut lines = Vec::new();
        for (path, messages) in &self.blocks {
            lines.push(format!("{path}:"));
            lines.extend(messages.iter().map(|message| format!(" - {message}")));
            lines.push(String::new());
        }
        lines.join("\n")
    }
}

/// Renders a value for provenance lines and coercion diagnostics.
///
/// Strings render verbatim rather than TOML-quoted.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
