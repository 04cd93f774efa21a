// src/utils/debug.rs
use std::fs::File;
use std::io::Write;
use std::path::Path;
use crate::utils::error::AppError;

/// Wraps each highlighted span of `text` in `[[kind>>` ... `<<kind]]` markers.
/// Overlapping highlights keep the one that starts first.
pub fn annotate_text(text: &str, highlights: &[(usize, usize, &str)]) -> String {
    let mut sorted_highlights = highlights.to_vec();
    sorted_highlights.sort_by_key(|h| (h.0, std::cmp::Reverse(h.1))); // Sort by position, longest first

    let mut annotated = String::with_capacity(text.len() + highlights.len() * 16);
    let mut last_pos = 0;

    for (start, end, kind) in sorted_highlights {
        if start < last_pos {
            tracing::trace!("Skipping overlapping highlight {}-{} ({})", start, end, kind);
            continue;
        }
        annotated.push_str(&text[last_pos..start]);
        annotated.push_str(&format!("[[{}>>", kind));
        annotated.push_str(&text[start..end]);
        annotated.push_str(&format!("<<{}]]", kind));
        last_pos = end;
    }

    annotated.push_str(&text[last_pos..]);
    annotated
}

/// Saves an annotated copy of a bot response with every match of the given
/// `(pattern, kind)` regexes marked, for eyeballing which headings the parser saw.
pub fn create_debug_text(text: &str, filename: &Path, patterns: &[(&str, &str)]) -> Result<(), AppError> {
    use regex::Regex;

    let mut highlights = Vec::new();

    for (pattern, kind) in patterns {
        let re = Regex::new(pattern).map_err(|e| {
            AppError::Config(format!("Invalid regex pattern '{}': {}", pattern, e))
        })?;

        for mat in re.find_iter(text) {
            highlights.push((mat.start(), mat.end(), *kind));
        }
    }

    let mut file = File::create(filename)?;
    file.write_all(annotate_text(text, &highlights).as_bytes())?;

    tracing::info!("Saved annotated response to {}", filename.display());
    Ok(())
}
