/// Front-end configuration that extends the base `Config` from core.
///
/// This configuration includes:
/// - All generic options from `libquwei_core::Config` (flattened via serde)
/// - Table browser layout
/// - Default log filter for the `quwei` binary
///
/// # Example
///
/// ```rust
/// use libquwei::QuweiConfig;
///
/// let config = QuweiConfig::default();
/// let session = config.base().session();
/// assert!(session.input_buffer().is_empty());
/// ```
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct QuweiConfig {
    /// Base configuration fields (charset, default zone, passthrough policy)
    #[serde(flatten)]
    pub base: libquwei_core::Config,

    /// Characters per row when printing a zone grid
    pub grid_columns: usize,

    /// `tracing` filter used when RUST_LOG is not set (e.g. "warn", "libquwei_core=debug")
    pub log_filter: String,
}

impl Default for QuweiConfig {
    fn default() -> Self {
        Self {
            base: libquwei_core::Config::default(),
            grid_columns: 10,
            log_filter: "warn".to_string(),
        }
    }
}

impl QuweiConfig {
    /// Load from a TOML file; missing keys take their defaults.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        use anyhow::Context;

        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: QuweiConfig = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.base.validate()?;
        if self.grid_columns == 0 {
            anyhow::bail!("grid_columns must be at least 1");
        }
        Ok(())
    }

    /// Convert this config into the base config
    pub fn into_base(self) -> libquwei_core::Config {
        self.base
    }

    /// Get a reference to the base config
    pub fn base(&self) -> &libquwei_core::Config {
        &self.base
    }

    /// Get a mutable reference to the base config
    pub fn base_mut(&mut self) -> &mut libquwei_core::Config {
        &mut self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libquwei_core::Charset;

    #[test]
    fn test_flattened_toml() {
        let text = r#"
charset = "gb2312"
default_zone = 30
grid_columns = 16
"#;
        let config: QuweiConfig = toml::from_str(text).unwrap();
        assert_eq!(config.base.charset, Charset::Gb2312);
        assert_eq!(config.base.default_zone, 30);
        assert_eq!(config.grid_columns, 16);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quwei.toml");
        let mut config = QuweiConfig::default();
        config.base_mut().clear_on_passthrough = true;
        config.save_toml(&path).unwrap();
        assert_eq!(QuweiConfig::load_toml(&path).unwrap(), config);
    }

    #[test]
    fn test_rejects_zero_columns() {
        let config = QuweiConfig {
            grid_columns: 0,
            ..QuweiConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
