use once_cell::sync::Lazy;
use regex::Regex;

use std::path::{Path, PathBuf};

use crate::core::constants::discovery;
use crate::core::error::Result;
use crate::discovery::finder::{SearchRequest, find};
use crate::logging;

static CONFIG_FILE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(discovery::CONFIG_FILE_PATTERN).expect("Failed to compile config file pattern")
});

/// Where and how to look for the Tauri project configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub root: PathBuf,
    pub config_pattern: Option<String>,
    pub ignore_patterns: Vec<String>,
    pub max_depth: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            config_pattern: None,
            ignore_patterns: discovery::IGNORE_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            max_depth: discovery::MAX_DEPTH,
        }
    }
}

impl SearchSettings {
    pub fn with_root<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Compile the patterns into a finder request
    pub fn to_request(&self) -> Result<SearchRequest> {
        let name_pattern = match &self.config_pattern {
            Some(pattern) => Regex::new(pattern)?,
            None => CONFIG_FILE_REGEX.clone(),
        };

        let mut request = SearchRequest::new(&self.root, name_pattern).max_depth(self.max_depth);
        for pattern in &self.ignore_patterns {
            request = request.exclude(Regex::new(pattern)?);
        }

        Ok(request)
    }
}

/// Locate the project configuration file below `settings.root`.
///
/// When several candidates exist the shallowest one wins, ties broken by path
/// order, so repeated runs pick the same file regardless of traversal order.
pub async fn locate_project_config(settings: &SearchSettings) -> Result<Option<PathBuf>> {
    let request = settings.to_request()?;
    let mut candidates = find(&request).await;

    candidates.sort_by(|a, b| {
        a.components()
            .count()
            .cmp(&b.components().count())
            .then_with(|| a.cmp(b))
    });

    let Some(chosen) = candidates.first().cloned() else {
        logging::log_config_not_found(&settings.root);
        return Ok(None);
    };

    if candidates.len() > 1 {
        logging::log_config_candidates(&chosen, &candidates[1..]);
    }
    logging::log_config_found(&chosen);

    Ok(Some(chosen))
}

/// Directory holding the project configuration, falling back to the file itself
pub fn config_dir(config_path: &Path) -> &Path {
    config_path.parent().unwrap_or(config_path)
}
