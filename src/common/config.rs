//! Configuration for the analysis drivers.
//!
//! Nothing in this crate *requires* a config file; [`AnalysisConfig::default`]
//! is a complete, working configuration. A driver may load overrides from a
//! `tac-flow.toml` placed next to its input file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::errors::ConfigError;

/// Which dominator-tree construction a driver should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DominatorAlgorithm {
    /// Cooper-Harvey-Kennedy iterative data-flow fixed point.
    Chk,
    /// Lengauer-Tarjan semidominator-based construction.
    LengauerTarjan,
}

impl Default for DominatorAlgorithm {
    fn default() -> Self {
        DominatorAlgorithm::Chk
    }
}

/// Top-level analysis configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub dominators: DominatorConfig,
    pub liveness: LivenessConfig,
    pub lvn: LvnConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DominatorConfig {
    /// Which algorithm a driver picks when not told otherwise.
    pub algorithm: DominatorAlgorithm,
}

impl Default for DominatorConfig {
    fn default() -> Self {
        DominatorConfig {
            algorithm: DominatorAlgorithm::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LivenessConfig {
    /// Emit a `tracing::debug!` line after every fixed-point pass.
    pub trace_iterations: bool,
}

impl Default for LivenessConfig {
    fn default() -> Self {
        LivenessConfig {
            trace_iterations: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LvnConfig {
    /// Whether `apply_lvn` should run before printing, or whether the block
    /// is printed untouched (useful for diffing before/after).
    pub enabled: bool,
}

impl Default for LvnConfig {
    fn default() -> Self {
        LvnConfig { enabled: true }
    }
}

impl AnalysisConfig {
    /// Load configuration from a TOML file, falling back to defaults for any
    /// field the file omits.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source: Box::new(source),
        })
    }

    /// Load `tac-flow.toml` next to `ir_file` if present, otherwise defaults.
    pub fn load_beside(ir_file: &Path) -> Result<Self, ConfigError> {
        let candidate = ir_file
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("tac-flow.toml");
        if candidate.is_file() {
            Self::load_from_file(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_enables_lvn_and_chk() {
        let cfg = AnalysisConfig::default();
        assert_eq!(cfg.dominators.algorithm, DominatorAlgorithm::Chk);
        assert!(cfg.lvn.enabled);
    }

    #[test]
    fn load_beside_missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let ir_path = dir.path().join("prog.ir");
        let cfg = AnalysisConfig::load_beside(&ir_path).unwrap();
        assert_eq!(cfg.dominators.algorithm, DominatorAlgorithm::Chk);
    }
}
