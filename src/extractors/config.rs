// src/extractors/config.rs
use crate::utils::error::AppError;

/// Line-shape thresholds used by the report scanners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Minimum run of `=`, `-`, `_`, `*` or `~` that counts as a section separator.
    pub separator_min_len: usize,
    /// Minimum letter count for an all-caps line to be treated as a heading.
    pub caps_heading_min_len: usize,
    /// Lines a MISSING FIELDS header may be followed by before the first file entry.
    pub missing_fields_lookahead: usize,
    /// Sentences at or below this length are dropped by the guidance fallback.
    pub min_sentence_len: usize,
    pub description_max_lines: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            separator_min_len: 10,
            caps_heading_min_len: 5,
            missing_fields_lookahead: 10,
            min_sentence_len: 10,
            description_max_lines: 4,
        }
    }
}

impl ParserConfig {
    /// Defaults overridden by any `PLANNING_*` environment variables that are set.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let fields: [(&str, &mut usize); 5] = [
            ("PLANNING_SEPARATOR_MIN_LEN", &mut config.separator_min_len),
            ("PLANNING_CAPS_HEADING_MIN_LEN", &mut config.caps_heading_min_len),
            ("PLANNING_MISSING_FIELDS_LOOKAHEAD", &mut config.missing_fields_lookahead),
            ("PLANNING_MIN_SENTENCE_LEN", &mut config.min_sentence_len),
            ("PLANNING_DESCRIPTION_MAX_LINES", &mut config.description_max_lines),
        ];

        for (key, slot) in fields {
            if let Some(raw) = lookup(key) {
                *slot = raw.trim().parse().map_err(|_| {
                    AppError::Config(format!("{} must be a non-negative integer, got '{}'", key, raw))
                })?;
                tracing::debug!("Using {}={} from environment", key, slot);
            }
        }

        Ok(config)
    }
}
