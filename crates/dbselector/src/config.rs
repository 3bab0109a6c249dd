//! Selector configuration: target dialect and bind-name prefix.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Target SQL engine family.
///
/// Only affects placeholder spelling in positional mode: PostgreSQL uses
/// `$1, $2, ...`, the others use `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    #[serde(alias = "postgresql", alias = "pg")]
    Postgres,
    MySql,
    Sqlite,
}

impl Dialect {
    /// Whether positional placeholders are numbered (`$n`) rather than `?`.
    pub fn numbered_placeholders(self) -> bool {
        matches!(self, Dialect::Postgres)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Postgres => "postgres",
            Dialect::MySql => "mysql",
            Dialect::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Dialect::Postgres),
            "mysql" => Ok(Dialect::MySql),
            "sqlite" => Ok(Dialect::Sqlite),
            other => Err(format!("unknown dialect: {other}")),
        }
    }
}

/// Configuration for a [`Selector`](crate::Selector).
///
/// Can be embedded in an application config file:
///
/// ```toml
/// dialect = "mysql"
/// parameter_prefix = "q1_"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Target dialect.
    pub dialect: Dialect,
    /// Prefix prepended to every generated named bind.
    pub parameter_prefix: String,
}

impl SelectorConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target dialect.
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Set the bind-name prefix.
    pub fn parameter_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.parameter_prefix = prefix.into();
        self
    }
}
