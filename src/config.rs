use std::path::Path;

use crate::error::Error;

/// Project configuration loaded from `.anchorstat.toml`.
/// Include/exclude patterns are path prefixes applied to markdown documents;
/// thresholds feed the report filters.
pub struct Config {
    exclude: Vec<String>,
    include: Vec<String>,
    /// Minimum line count for a document to appear in the size-gated reports.
    pub min_lines: u64,
    /// Minimum incoming reference count for the reference-gated reports.
    pub min_refs: u32,
}

/// Raw TOML structure for `.anchorstat.toml`.
#[derive(serde::Deserialize)]
struct AnchorstatTomlConfig {
    #[serde(default)]
    exclude: Vec<String>,
    #[serde(default)]
    include: Vec<String>,
    #[serde(default = "default_min_lines")]
    min_lines: u64,
    #[serde(default = "default_min_refs")]
    min_refs: u32,
}

/// Default line-count threshold for Reports A and B.
fn default_min_lines() -> u64 {
    return 200;
}

/// Default incoming-reference threshold for Reports A and B.
fn default_min_refs() -> u32 {
    return 3;
}

impl Config {
    /// Load config from `.anchorstat.toml` in the given corpus root.
    /// Returns defaults if the file doesn't exist.
    /// Returns an error if the file exists but is malformed — never silently
    /// falls back to defaults when the user wrote a config file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(".anchorstat.toml");
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::defaults()),
            Err(e) => return Err(Error::Io(e)),
        };

        let raw: AnchorstatTomlConfig = toml::from_str(&content)?;
        Ok(Self {
            exclude: raw.exclude,
            include: raw.include,
            min_lines: raw.min_lines,
            min_refs: raw.min_refs,
        })
    }

    /// Default config: scan everything, stock thresholds.
    pub fn defaults() -> Self {
        Self {
            exclude: Vec::new(),
            include: Vec::new(),
            min_lines: default_min_lines(),
            min_refs: default_min_refs(),
        }
    }

    /// Check whether a document path should be scanned.
    ///
    /// A path is included if no include patterns are set (scan everything),
    /// or if the path starts with at least one include pattern.
    /// An included path is then excluded if it starts with any exclude pattern.
    pub fn should_scan(&self, relative_path: &str) -> bool {
        let included = self.include.is_empty()
            || self.include.iter().any(|p| relative_path.starts_with(p.as_str()));

        if !included {
            return false;
        }

        !self.exclude.iter().any(|p| relative_path.starts_with(p.as_str()))
    }
}
