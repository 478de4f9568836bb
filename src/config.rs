//! Configuration management
//!
//! Config file is `vlog.toml`, looked up next to the executable unless a
//! path is given explicitly. Every section is optional.

use crate::constants::{DEFAULT_SINK_HOST, DEFAULT_SINK_UDP_PORT, FILTER_KEYWORDS_MAX_BYTES};
use crate::error::{Result, VLogError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "vlog.toml";

// =============================================================================
// Application Configuration
// =============================================================================

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub sink: SinkConfig,
    pub filter: FilterConfig,
    pub route: RouteConfig,
}

// =============================================================================
// Display Configuration
// =============================================================================

/// Console colors, as names or `#rrggbb`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub log: String,
    pub info: String,
    pub warn: String,
    pub error: String,
    pub table: String,
    /// Color for filter keyword echoes
    pub tag: String,
    /// Color for named event lines
    pub event: String,
    /// Prefix direct prints with `[MM/DD HH:MM:SS]`
    pub timestamps: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            log: "white".to_string(),
            info: "#c2c2c2".to_string(),
            warn: "yellow".to_string(),
            error: "red".to_string(),
            table: "white".to_string(),
            tag: "purple".to_string(),
            event: "beige".to_string(),
            timestamps: true,
        }
    }
}

// =============================================================================
// Sink Configuration
// =============================================================================

/// Remote sink backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// No remote sink, reporting is a no-op
    #[default]
    None,
    /// Newline-delimited JSON over UDP
    Udp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    pub kind: SinkKind,
    /// Destination host for the UDP sink
    pub host: String,
    /// Destination port for the UDP sink
    pub udp_port: u16,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            kind: SinkKind::None,
            host: DEFAULT_SINK_HOST.to_string(),
            udp_port: DEFAULT_SINK_UDP_PORT,
        }
    }
}

// =============================================================================
// Filter / Route Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Soft limit on aggregate keyword size
    pub max_bytes: usize,
    /// Keywords registered at startup (first one replaces, rest append)
    pub keywords: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_bytes: FILTER_KEYWORDS_MAX_BYTES,
            keywords: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Route used as the tag fallback
    pub current: Option<String>,
}

impl Config {
    /// Check values serde can't
    pub fn validate(&self) -> Result<()> {
        if self.sink.kind == SinkKind::Udp && self.sink.udp_port == 0 {
            return Err(VLogError::ConfigValidation {
                field: "sink.udp_port",
                reason: "must be non-zero".into(),
            });
        }
        if self.sink.kind == SinkKind::Udp && self.sink.host.trim().is_empty() {
            return Err(VLogError::ConfigValidation {
                field: "sink.host",
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }
}

/// Get the config file path
///
/// An explicit path wins; otherwise `vlog.toml` next to the executable.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let exe = std::env::current_exe().map_err(|e| VLogError::ConfigRead {
        path: PathBuf::from("executable"),
        source: e,
    })?;
    let exe_dir = exe.parent().ok_or_else(|| VLogError::ConfigValidation {
        field: "exe_path",
        reason: "no parent directory".into(),
    })?;
    Ok(exe_dir.join(CONFIG_FILE_NAME))
}

/// Parse config text
pub fn parse(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).map_err(|e| VLogError::ConfigValidation {
        field: "config",
        reason: e.to_string(),
    })?;
    config.validate()?;
    Ok(config)
}

/// Read and parse a config file
pub fn load_from(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| VLogError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse(&content)
}

/// Load config, falling back to defaults when missing or invalid
pub fn load(explicit: Option<&Path>) -> Config {
    let path = match config_path(explicit) {
        Ok(p) => p,
        Err(e) => {
            warn!("Failed to determine config path: {}, using defaults", e);
            return Config::default();
        }
    };

    if !path.exists() {
        if explicit.is_some() {
            warn!("Config {:?} not found, using defaults", path);
        }
        return Config::default();
    }

    match load_from(&path) {
        Ok(config) => config,
        Err(e) => {
            warn!("Config error in {:?}: {}, using defaults", path, e);
            Config::default()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Default values tests
    // =========================================================================

    #[test]
    fn test_default_values() {
        let config = Config::default();

        assert_eq!(config.display.info, "#c2c2c2");
        assert_eq!(config.display.tag, "purple");
        assert!(config.display.timestamps);
        assert_eq!(config.sink.kind, SinkKind::None);
        assert_eq!(config.sink.udp_port, DEFAULT_SINK_UDP_PORT);
        assert_eq!(config.filter.max_bytes, 1024);
        assert!(config.filter.keywords.is_empty());
        assert_eq!(config.route.current, None);
    }

    // =========================================================================
    // Serialization tests
    // =========================================================================

    #[test]
    fn test_sink_kind_toml_deserialization() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            kind: SinkKind,
        }

        let none: Wrapper = toml::from_str("kind = \"none\"").unwrap();
        let udp: Wrapper = toml::from_str("kind = \"udp\"").unwrap();

        assert_eq!(none.kind, SinkKind::None);
        assert_eq!(udp.kind, SinkKind::Udp);
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.sink.kind = SinkKind::Udp;
        config.sink.udp_port = 9400;
        config.filter.keywords = vec!["openid".into(), "wechatId".into()];
        config.route.current = Some("pages/index/index".into());

        let text = toml::to_string_pretty(&config).unwrap();
        let restored = parse(&text).unwrap();

        assert_eq!(restored.sink.kind, SinkKind::Udp);
        assert_eq!(restored.sink.udp_port, 9400);
        assert_eq!(restored.filter.keywords, vec!["openid", "wechatId"]);
        assert_eq!(restored.route.current.as_deref(), Some("pages/index/index"));
    }

    #[test]
    fn test_partial_section() {
        let config = parse(
            r#"
[display]
warn = "magenta"
"#,
        )
        .unwrap();

        assert_eq!(config.display.warn, "magenta");
        // Rest should be defaults
        assert_eq!(config.display.error, "red");
        assert_eq!(config.sink.kind, SinkKind::None);
    }

    #[test]
    fn test_empty_file() {
        let config = parse("").unwrap();
        assert_eq!(config.filter.max_bytes, 1024);
        assert_eq!(config.display.log, "white");
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn test_udp_port_zero_rejected() {
        let result = parse(
            r#"
[sink]
kind = "udp"
udp_port = 0
"#,
        );
        assert!(matches!(
            result,
            Err(VLogError::ConfigValidation {
                field: "sink.udp_port",
                ..
            })
        ));
    }

    #[test]
    fn test_syntax_error_reported() {
        assert!(parse("[sink\nkind = ").is_err());
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = Path::new("/tmp/custom.toml");
        assert_eq!(config_path(Some(path)).unwrap(), path);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = load(Some(Path::new("/nonexistent/vlog.toml")));
        assert_eq!(config.sink.kind, SinkKind::None);
    }
}
