use crate::{Result, WorkbenchError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".anchor-workbench.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub toolchain: ToolchainConfig,
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ToolchainConfig {
    /// Path to the `anchor` binary (default: "anchor" from PATH)
    #[serde(default)]
    pub anchor: Option<String>,
    /// Path to the `solana` binary (default: "solana" from PATH)
    #[serde(default)]
    pub solana: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorkspaceConfig {
    /// Directory containing the Anchor program crates (default: "programs")
    #[serde(default)]
    pub programs_dir: Option<PathBuf>,
    /// Build artifacts directory holding idl/ and deploy/ (default: "target")
    #[serde(default)]
    pub artifacts_dir: Option<PathBuf>,
    /// Deploy programs right after a successful build
    #[serde(default)]
    pub deploy_after_build: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TraceConfig {
    /// Execution trace file replayed by automatic mode
    #[serde(default)]
    pub default_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file in the project root
    pub fn load() -> Result<Self> {
        let config_path = Path::new(DEFAULT_CONFIG_FILE);

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            WorkbenchError::FileError(format!(
                "Failed to read config file {:?}: {}",
                config_path, e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            WorkbenchError::FileError(format!(
                "Failed to parse TOML config from {:?}: {}",
                config_path, e
            ))
        })?;

        Ok(config)
    }

    /// Load default config if file is missing, otherwise fall back on parse failure
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                warn!("Warning: Failed to load config: {}. Using defaults.", e);
                Config::default()
            }
        }
    }

    pub fn anchor_bin(&self) -> &str {
        self.toolchain.anchor.as_deref().unwrap_or("anchor")
    }

    pub fn solana_bin(&self) -> &str {
        self.toolchain.solana.as_deref().unwrap_or("solana")
    }

    pub fn programs_dir(&self) -> PathBuf {
        self.workspace
            .programs_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("programs"))
    }

    pub fn artifacts_dir(&self) -> PathBuf {
        self.workspace
            .artifacts_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("target"))
    }

    pub fn deploy_after_build(&self) -> bool {
        self.workspace.deploy_after_build.unwrap_or(false)
    }

    pub fn trace_file(&self) -> PathBuf {
        self.trace
            .default_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("execution_trace.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.anchor_bin(), "anchor");
        assert_eq!(config.solana_bin(), "solana");
        assert_eq!(config.programs_dir(), PathBuf::from("programs"));
        assert_eq!(config.artifacts_dir(), PathBuf::from("target"));
        assert!(!config.deploy_after_build());
        assert_eq!(config.trace_file(), PathBuf::from("execution_trace.json"));
    }

    #[test]
    fn test_partial_config_parses() {
        let toml = r#"
            [toolchain]
            anchor = "/usr/local/bin/anchor"

            [trace]
            default_file = "traces/demo.json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.anchor_bin(), "/usr/local/bin/anchor");
        assert_eq!(config.solana_bin(), "solana");
        assert_eq!(config.trace_file(), PathBuf::from("traces/demo.json"));
    }
}
