//! Name filtering for tree walking

use regex::{Regex, RegexBuilder};

use super::config::WalkerConfig;

/// Include/exclude regex filters applied to file names.
///
/// A pattern that fails to compile is dropped, so it never rejects anything.
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    include: Option<Regex>,
    exclude: Option<Regex>,
}

impl FileFilter {
    pub fn new(config: &WalkerConfig) -> Self {
        Self {
            include: compile(config.pattern.as_deref(), config.ignore_case),
            exclude: compile(config.ignore_pattern.as_deref(), config.ignore_case),
        }
    }

    /// Check if a file name passes both filters.
    pub fn is_included(&self, name: &str) -> bool {
        if let Some(re) = &self.include {
            if !re.is_match(name) {
                return false;
            }
        }
        if let Some(re) = &self.exclude {
            if re.is_match(name) {
                return false;
            }
        }
        true
    }
}

fn compile(pattern: Option<&str>, ignore_case: bool) -> Option<Regex> {
    let pattern = pattern.filter(|p| !p.is_empty())?;
    match RegexBuilder::new(pattern)
        .case_insensitive(ignore_case)
        .build()
    {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(pattern, error = %e, "ignoring malformed pattern");
            None
        }
    }
}
