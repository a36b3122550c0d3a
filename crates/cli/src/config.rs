//! Configuration parsing and validation.
//!
//! Handles `scour.toml` parsing with version validation and unknown key
//! warnings. Config supplies defaults; CLI flags always win over it.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Minimum config structure for version checking.
#[derive(Deserialize)]
struct VersionOnly {
    version: Option<i64>,
}

/// Config with flexible parsing that captures unknown keys.
#[derive(Deserialize)]
struct FlexibleConfig {
    version: i64,

    #[serde(default)]
    search: Option<toml::Value>,

    #[serde(default)]
    ignore: Option<toml::Value>,

    #[serde(flatten)]
    unknown: std::collections::BTreeMap<String, toml::Value>,
}

/// Full configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Default search options.
    #[serde(default)]
    pub search: SearchConfig,

    /// Ignore pattern configuration.
    #[serde(default)]
    pub ignore: IgnoreConfig,
}

/// Default search options, overridable by CLI flags.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Case-insensitive matching by default.
    #[serde(default)]
    pub ignore_case: bool,

    /// Traverse hidden files/directories by default.
    #[serde(default)]
    pub hidden: bool,

    /// Follow symlinks during traversal.
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Skip files that look binary.
    #[serde(default = "SearchConfig::default_ignore_binary")]
    pub ignore_binary: bool,

    /// Maximum directory depth (unbounded if unset).
    pub max_depth: Option<usize>,

    /// Worker thread count (0 or unset = auto).
    pub jobs: Option<usize>,

    /// Maximum nested archive depth when decompressing.
    #[serde(default = "SearchConfig::default_zmax")]
    pub zmax: u32,

    /// Use memory-mapped I/O above the mmap threshold.
    #[serde(default = "SearchConfig::default_mmap")]
    pub mmap: bool,
}

impl SearchConfig {
    fn default_ignore_binary() -> bool {
        true
    }

    fn default_zmax() -> u32 {
        1
    }

    fn default_mmap() -> bool {
        true
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            ignore_case: false,
            hidden: false,
            follow_symlinks: false,
            ignore_binary: Self::default_ignore_binary(),
            max_depth: None,
            jobs: None,
            zmax: Self::default_zmax(),
            mmap: Self::default_mmap(),
        }
    }
}

/// Ignore pattern configuration.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct IgnoreConfig {
    /// Glob patterns excluded from traversal (e.g. `"*.snapshot"`, `"vendor/"`).
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Additional ignore-file names to honor besides `.gitignore`.
    #[serde(default)]
    pub files: Vec<String>,
}

/// Currently supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Known top-level keys in the config.
const KNOWN_KEYS: &[&str] = &["version", "search", "ignore"];

/// Known `search` keys in the config.
const KNOWN_SEARCH_KEYS: &[&str] = &[
    "ignore_case",
    "hidden",
    "follow_symlinks",
    "ignore_binary",
    "max_depth",
    "jobs",
    "zmax",
    "mmap",
];

/// Known `ignore` keys in the config.
const KNOWN_IGNORE_KEYS: &[&str] = &["patterns", "files"];

/// Load and validate config from a file path (strict mode).
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse(&content, path)
}

/// Load config, warning on unknown keys instead of rejecting them.
pub fn load_with_warnings(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_with_warnings(&content, path)
}

/// Parse config from string content (strict mode).
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    let version_check: VersionOnly = toml::from_str(content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })?;

    let version = version_check.version.ok_or_else(|| Error::Config {
        message: "missing required field: version".to_string(),
        path: Some(path.to_path_buf()),
    })?;

    if version != SUPPORTED_VERSION {
        return Err(Error::Config {
            message: format!(
                "unsupported config version {} (supported: {})\n  Upgrade scour to use this config.",
                version, SUPPORTED_VERSION
            ),
            path: Some(path.to_path_buf()),
        });
    }

    toml::from_str(content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })
}

/// Parse config, warning on unknown keys rather than failing.
pub fn parse_with_warnings(content: &str, path: &Path) -> Result<Config> {
    let flexible: FlexibleConfig = toml::from_str(content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })?;

    if flexible.version != SUPPORTED_VERSION {
        return Err(Error::Config {
            message: format!(
                "unsupported config version {} (supported: {})",
                flexible.version, SUPPORTED_VERSION
            ),
            path: Some(path.to_path_buf()),
        });
    }

    let mut unknown_keys = BTreeSet::new();
    for key in flexible.unknown.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            unknown_keys.insert(key.clone());
        }
    }
    for key in &unknown_keys {
        warn_unknown_key(path, key);
    }

    let search = match flexible.search {
        Some(toml::Value::Table(t)) => {
            for key in t.keys() {
                if !KNOWN_SEARCH_KEYS.contains(&key.as_str()) {
                    warn_unknown_key(path, &format!("search.{}", key));
                }
            }
            let mut search = SearchConfig::default();
            if let Some(v) = t.get("ignore_case").and_then(|v| v.as_bool()) {
                search.ignore_case = v;
            }
            if let Some(v) = t.get("hidden").and_then(|v| v.as_bool()) {
                search.hidden = v;
            }
            if let Some(v) = t.get("follow_symlinks").and_then(|v| v.as_bool()) {
                search.follow_symlinks = v;
            }
            if let Some(v) = t.get("ignore_binary").and_then(|v| v.as_bool()) {
                search.ignore_binary = v;
            }
            if let Some(v) = t.get("max_depth").and_then(|v| v.as_integer()) {
                search.max_depth = Some(v as usize);
            }
            if let Some(v) = t.get("jobs").and_then(|v| v.as_integer()) {
                search.jobs = Some(v as usize);
            }
            if let Some(v) = t.get("zmax").and_then(|v| v.as_integer()) {
                search.zmax = v as u32;
            }
            if let Some(v) = t.get("mmap").and_then(|v| v.as_bool()) {
                search.mmap = v;
            }
            search
        }
        _ => SearchConfig::default(),
    };

    let ignore = match flexible.ignore {
        Some(toml::Value::Table(t)) => {
            for key in t.keys() {
                if !KNOWN_IGNORE_KEYS.contains(&key.as_str()) {
                    warn_unknown_key(path, &format!("ignore.{}", key));
                }
            }
            let patterns = t
                .get("patterns")
                .and_then(|v| v.as_array())
                .map(|arr| arr.iter().filter_map(|v| v.as_str()).map(String::from).collect())
                .unwrap_or_default();
            let files = t
                .get("files")
                .and_then(|v| v.as_array())
                .map(|arr| arr.iter().filter_map(|v| v.as_str()).map(String::from).collect())
                .unwrap_or_default();
            IgnoreConfig { patterns, files }
        }
        _ => IgnoreConfig::default(),
    };

    Ok(Config {
        version: flexible.version,
        search,
        ignore,
    })
}

fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "scour: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
