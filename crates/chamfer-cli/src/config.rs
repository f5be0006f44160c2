//! TOML configuration file.
//!
//! ```toml
//! [solver]
//! convention = "face"
//! ordering = "decreasing"
//! compensation = "closed_form"
//!
//! [post]
//! clearance = 5.0
//! feed = 0.1
//! flavor = "fanuc"
//!
//! [schematic]
//! shoulder_length = 12.0
//! ```
//!
//! Every key is optional and falls back to its default.

use std::path::Path;

use anyhow::{Context, Result};
use chamfer_drafting::SchematicSettings;
use chamfer_kernel::ChamferSettings;
use chamfer_post::PostSettings;
use serde::{Deserialize, Serialize};

/// All settings the `chamfer` binary reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Solver policies.
    pub solver: ChamferSettings,
    /// G-code output.
    pub post: PostSettings,
    /// Drawing sizes.
    pub schematic: SchematicSettings,
}

impl Config {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text).context("invalid configuration")?;
        Ok(config)
    }

    /// Serialize to TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("in config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.solver.validate()?;
        self.post.validate()?;
        self.schematic.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chamfer_kernel::{AngleConvention, CompensationStrategy, OverconstrainedPolicy};
    use chamfer_post::GcodeFlavor;

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::from_toml_str(
            r#"
            [solver]
            convention = "axis"
            compensation = "legacy_table"

            [solver.overconstrained]
            mode = "verify"
            tolerance = 0.01

            [post]
            flavor = "linux_cnc"
            feed = 0.08

            [schematic]
            stub_length = 15.0
            "#,
        )
        .unwrap();

        assert_eq!(config.solver.convention, AngleConvention::AxisAngle);
        assert_eq!(config.solver.compensation, CompensationStrategy::LegacyTable);
        assert_eq!(
            config.solver.overconstrained,
            OverconstrainedPolicy::Verify { tolerance: 0.01 }
        );
        assert_eq!(config.post.flavor, GcodeFlavor::LinuxCnc);
        assert_eq!(config.post.feed, 0.08);
        assert_eq!(config.post.clearance, 5.0);
        assert_eq!(config.schematic.stub_length, 15.0);
        assert_eq!(
            config.schematic.shoulder_length,
            SchematicSettings::default().shoulder_length
        );
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.solver.overconstrained = OverconstrainedPolicy::Verify { tolerance: 0.005 };
        config.post.flavor = GcodeFlavor::Fanuc;

        let text = config.to_toml_string().unwrap();
        assert!(text.contains("[post]"));
        assert!(text.contains("[schematic]"));
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_invalid_values() {
        assert!(Config::from_toml_str("[post]\nflavor = \"heidenhain\"").is_err());

        let config = Config::from_toml_str("[post]\nfeed = -0.1").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/chamfer.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
