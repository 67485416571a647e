//! Sanitizer configuration
//!
//! Selects which passes run. The pipeline order is fixed; configuration
//! can only switch passes on or off.

use std::fmt;
use std::str::FromStr;

use super::SanitizeError;

/// Environment variable holding a pass list, e.g. `fences,node-labels`
pub const PASSES_ENV: &str = "CODEWALKER_PASSES";

/// Pass names in pipeline order
pub const PASS_NAMES: [&str; 4] = ["fences", "edge-labels", "node-labels", "semicolons"];

/// Which passes the sanitizer runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SanitizeConfig {
    pub fences: bool,
    pub edge_labels: bool,
    pub node_labels: bool,
    pub semicolons: bool,
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self::all()
    }
}

impl SanitizeConfig {
    /// Every pass enabled
    pub fn all() -> Self {
        Self {
            fences: true,
            edge_labels: true,
            node_labels: true,
            semicolons: true,
        }
    }

    /// Every pass disabled; the sanitizer returns its input unchanged
    pub fn none() -> Self {
        Self {
            fences: false,
            edge_labels: false,
            node_labels: false,
            semicolons: false,
        }
    }

    pub fn with_fences(mut self, enabled: bool) -> Self {
        self.fences = enabled;
        self
    }

    pub fn with_edge_labels(mut self, enabled: bool) -> Self {
        self.edge_labels = enabled;
        self
    }

    pub fn with_node_labels(mut self, enabled: bool) -> Self {
        self.node_labels = enabled;
        self
    }

    pub fn with_semicolons(mut self, enabled: bool) -> Self {
        self.semicolons = enabled;
        self
    }

    /// Read the pass list from `CODEWALKER_PASSES`, or the default if unset
    pub fn from_env() -> Result<Self, SanitizeError> {
        match std::env::var(PASSES_ENV) {
            Ok(value) => value.parse(),
            Err(std::env::VarError::NotPresent) => Ok(Self::default()),
            Err(std::env::VarError::NotUnicode(_)) => Err(SanitizeError::config(format!(
                "{} is not valid unicode",
                PASSES_ENV
            ))),
        }
    }

    /// Returns true if the named pass is enabled
    pub fn is_enabled(&self, name: &str) -> bool {
        match name {
            "fences" => self.fences,
            "edge-labels" => self.edge_labels,
            "node-labels" => self.node_labels,
            "semicolons" => self.semicolons,
            _ => false,
        }
    }

    /// Names of the enabled passes in pipeline order
    pub fn enabled_passes(&self) -> Vec<&'static str> {
        PASS_NAMES
            .iter()
            .copied()
            .filter(|name| self.is_enabled(name))
            .collect()
    }
}

impl FromStr for SanitizeConfig {
    type Err = SanitizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut config = Self::none();
        for name in s.split(',').map(str::trim).filter(|name| !name.is_empty()) {
            match name.to_lowercase().as_str() {
                "all" => config = Self::all(),
                "none" => config = Self::none(),
                "fences" => config.fences = true,
                "edge-labels" => config.edge_labels = true,
                "node-labels" => config.node_labels = true,
                "semicolons" => config.semicolons = true,
                _ => return Err(SanitizeError::unknown_pass(name)),
            }
        }
        Ok(config)
    }
}

impl fmt::Display for SanitizeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let passes = self.enabled_passes();
        if passes.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", passes.join(","))
        }
    }
}
