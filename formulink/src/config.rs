//! Import configuration: which modules and functions are eligible

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Attribution attached to every imported entry
pub const DEFAULT_CITATION: &str =
    "PlasmaPy Community et al. (2021). PlasmaPy, version 0.5.0, Zenodo, http://doi.org/10.5281/zenodo.4602818";

/// Modules searched by a full import
pub const DEFAULT_MODULES: [&str; 14] = [
    "plasma.diagnostics.langmuir",
    "plasma.diagnostics.thomson",
    "plasma.formulary.braginskii",
    "plasma.formulary.collisions",
    "plasma.formulary.dielectric",
    "plasma.formulary.dimensionless",
    "plasma.formulary.drifts",
    "plasma.formulary.ionization",
    "plasma.formulary.parameters",
    "plasma.formulary.quantum",
    "plasma.formulary.radiation",
    "plasma.formulary.relativity",
    "plasma.formulary.distribution",
    "plasma.formulary.mathematics",
];

/// Functions known to return structures the registry cannot hold
pub const DEFAULT_DENY: [&str; 18] = [
    "swept_probe_analysis",
    "Characteristic",
    "get_plasma_potential",
    "get_floating_potential",
    "get_electron_saturation_current",
    "get_ion_saturation_current",
    "extract_exponential_section",
    "extract_ion_section",
    "get_electron_temperature",
    "extrapolate_electron_current",
    "get_ion_density_OML",
    "extrapolate_ion_current_OML",
    "get_EEDF",
    "spectral_density",
    "ClassicalTransport",
    "impact_parameter",
    "cold_plasma_permittivity_SDP",
    "cold_plasma_permittivity_LRP",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Allow-list, deny-list and naming markers for an import run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Module allow-list, in import order
    pub modules: Vec<String>,
    /// Function deny-list
    pub deny: Vec<String>,
    /// Trailing character of exported copies skipped by a full import
    pub internal_marker: char,
    /// Type name whose appearance in a return name marks a type leak
    pub container_marker: String,
    pub citation: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            modules: DEFAULT_MODULES.iter().map(|s| s.to_string()).collect(),
            deny: DEFAULT_DENY.iter().map(|s| s.to_string()).collect(),
            internal_marker: '_',
            container_marker: "Quantity".to_string(),
            citation: DEFAULT_CITATION.to_string(),
        }
    }
}

impl BridgeConfig {
    /// Load from a JSON file. Missing fields keep their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.container_marker.trim().is_empty() {
            return Err(ConfigError::Invalid("container_marker must not be empty".to_string()));
        }
        if self.modules.iter().any(|m| m.trim().is_empty()) {
            return Err(ConfigError::Invalid("module paths must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn allows_module(&self, path: &str) -> bool {
        self.modules.iter().any(|m| m == path)
    }

    pub fn denies(&self, function: &str) -> bool {
        self.deny.iter().any(|d| d == function)
    }

    /// Whether an exported name is an internal copy of another export
    pub fn is_internal_copy(&self, name: &str) -> bool {
        name.ends_with(self.internal_marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BridgeConfig::default();
        assert!(config.allows_module("plasma.formulary.parameters"));
        assert!(!config.allows_module("plasma.formulary.magnetostatics"));
        assert!(config.denies("impact_parameter"));
        assert!(!config.denies("impact_parameter_perp"));
        assert!(config.is_internal_copy("wp_"));
        assert!(!config.is_internal_copy("plasma_frequency"));
        assert!(config.citation.contains("10.5281/zenodo.4602818"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = BridgeConfig::from_json(r#"{ "deny": ["beta"] }"#).unwrap();
        assert_eq!(config.deny, vec!["beta"]);
        assert_eq!(config.modules.len(), DEFAULT_MODULES.len());
        assert_eq!(config.container_marker, "Quantity");
    }

    #[test]
    fn test_rejects_empty_marker() {
        let err = BridgeConfig::from_json(r#"{ "container_marker": "" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(BridgeConfig::from_json("{ modules"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = BridgeConfig::from_path("/nonexistent/formulink.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
