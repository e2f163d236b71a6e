//! Runtime mode for Marquee.

use serde::{Deserialize, Serialize};

/// Which backends a Marquee process talks to.
///
/// Production searches TMDB and counts searches in Appwrite. Development
/// serves the built-in demo catalog and keeps counts in memory, so the UI and
/// CLI work offline behind the same traits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    Production,
    #[default]
    Development,
}

impl RuntimeMode {
    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    /// Name accepted by `--mode` and used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
        }
    }

    /// Catalog and suggestion store backing this mode.
    pub fn backends(self) -> &'static str {
        match self {
            Self::Production => "TMDB catalog, Appwrite suggestions",
            Self::Development => "demo catalog, in-memory suggestions",
        }
    }
}

impl std::fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RuntimeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" => Ok(Self::Development),
            _ => Err(format!(
                "Unknown mode '{s}', expected production or development"
            )),
        }
    }
}
