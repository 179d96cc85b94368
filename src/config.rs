use std::path::{Path, PathBuf};

use log::warn;
use serde_json::Value;

use crate::resolve::collapse_dots;
use crate::util::path_to_uri;

/// File name searched for when discovering project configuration.
pub const CONFIG_FILE_NAME: &str = "stylepath.json";

/// Project configuration read from `stylepath.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleConfig {
    pub path: PathBuf,
    /// Extra search roots, already made absolute against the config file.
    pub search_paths: Vec<String>,
}

/// Search `stylepath.json` walking up from `start_dir` and read it.
///
/// A file that cannot be read or parsed is reported and treated as absent.
pub fn load_config(start_dir: &Path) -> Option<StyleConfig> {
    let config_path = find_config(start_dir)?;
    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            warn!("cannot read {}: {e}", config_path.display());
            return None;
        }
    };

    let val: Value = match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            warn!("failed to parse {}: {e}", config_path.display());
            return None;
        }
    };

    let config_dir = config_path.parent()?;
    let search_paths = match val.get("searchPaths") {
        None => Vec::new(),
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| {
                let s = entry.as_str();
                if s.is_none() {
                    warn!("{}: ignoring non-string search path {entry}", config_path.display());
                }
                s
            })
            .map(|entry| config_root(config_dir, entry))
            .collect(),
        Some(other) => {
            warn!(
                "{}: searchPaths must be an array, got {other}",
                config_path.display()
            );
            Vec::new()
        }
    };

    Some(StyleConfig {
        path: config_path,
        search_paths,
    })
}

/// Clean up a search root given on the command line.
pub fn search_root(entry: &str) -> String {
    let root = collapse_dots(entry);
    if root.is_empty() {
        ".".to_string()
    } else {
        root
    }
}

/// Resolve a configured root against the directory holding the config file.
fn config_root(config_dir: &Path, entry: &str) -> String {
    if Path::new(entry).is_absolute() || entry.contains("://") {
        return search_root(entry);
    }
    let dir = path_to_uri(config_dir);
    search_root(&format!("{}/{entry}", dir.trim_end_matches('/')))
}

/// Walk up directories from `start` looking for the config file.
fn find_config(start: &Path) -> Option<PathBuf> {
    let mut dir = if start.is_dir() {
        start.to_path_buf()
    } else {
        start.parent()?.to_path_buf()
    };

    loop {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}
