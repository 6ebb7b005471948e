//! Declarative configuration
//!
//! [`EscapeSettings`] is the serializable form of a configuring call, for
//! setups that keep their suppression rules in a config file:
//!
//! ```json
//! { "exceptions": ["ValueError", "KeyError"], "log": true }
//! ```
//!
//! `exceptions` may be a single name, a list of names, or absent (the
//! wildcard). `log` attaches a [`TracingLogger`]. Default return values are
//! typed and are set in code with [`Escape::default_return`].

use serde::{Deserialize, Serialize};

use crate::config::Escape;
use crate::core::class::ClassRegistry;
use crate::error::WrongUsageError;
use crate::observability::TracingLogger;

/// One exception name or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExceptionNames {
    /// A single name, `"ValueError"` or `"..."`.
    One(String),
    /// Several names.
    Many(Vec<String>),
}

impl ExceptionNames {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(name) => vec![name],
            Self::Many(names) => names,
        }
    }
}

/// Serializable suppression settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EscapeSettings {
    /// Classes to suppress; `None` means the wildcard.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exceptions: Option<ExceptionNames>,
    /// Forward decisions to `tracing`.
    pub log: bool,
}

impl EscapeSettings {
    /// Resolve the settings into a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WrongUsageError`] for unknown names or a wildcard listed
    /// together with explicit classes.
    pub fn resolve(&self, registry: &ClassRegistry) -> Result<Escape, WrongUsageError> {
        let config = match self.exceptions.clone() {
            None => Escape::new(),
            Some(names) => Escape::catching_in(registry, names.into_vec())?,
        };

        Ok(if self.log {
            config.logger(TracingLogger::new())
        } else {
            config
        })
    }
}
