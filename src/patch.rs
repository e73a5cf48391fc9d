//! Unified diffs between two versions of a file, trimmed for display

use similar::TextDiff;
use tracing::debug;

use crate::Config;

const INDEX_SEPARATOR: &str =
    "===================================================================";

/// Number of preamble lines (`Index:`, separator, `---`, `+++`) in a patch
const PREAMBLE_LINES: usize = 4;

/// Full unified patch, preamble included. Missing contents diff as empty text.
pub fn create_patch(
    config: &Config,
    filename: Option<&str>,
    old: Option<&str>,
    new: Option<&str>,
) -> String {
    let name = filename
        .unwrap_or(config.default_patch_filename.as_str())
        .replace('\\', "/");
    let old = old.unwrap_or_default();
    let new = new.unwrap_or_default();

    let diff = TextDiff::from_lines(old, new);
    let mut patch = format!("Index: {name}\n{INDEX_SEPARATOR}\n--- {name}\n+++ {name}\n");
    let hunks = diff
        .unified_diff()
        .context_radius(config.diff_context_lines)
        .to_string();
    let hunks: Vec<String> = hunks.split('\n').map(expand_hunk_header).collect();
    patch.push_str(&hunks.join("\n"));

    debug!("Created patch for {} ({} bytes)", name, patch.len());
    patch
}

/// Spell out single-line ranges in a hunk header, so `@@ -3 +3 @@`
/// becomes `@@ -3,1 +3,1 @@`. Other lines pass through unchanged.
fn expand_hunk_header(line: &str) -> String {
    let Some(ranges) = line
        .strip_prefix("@@ ")
        .and_then(|rest| rest.strip_suffix(" @@"))
    else {
        return line.to_string();
    };

    let ranges: Vec<String> = ranges
        .split(' ')
        .map(|range| {
            if range.contains(',') {
                range.to_string()
            } else {
                format!("{range},1")
            }
        })
        .collect();
    format!("@@ {} @@", ranges.join(" "))
}

/// Hunks only: the patch with its four preamble lines removed
pub fn create_pretty_patch(filename: Option<&str>, old: Option<&str>, new: Option<&str>) -> String {
    create_pretty_patch_with(&Config::default(), filename, old, new)
}

pub fn create_pretty_patch_with(
    config: &Config,
    filename: Option<&str>,
    old: Option<&str>,
    new: Option<&str>,
) -> String {
    create_patch(config, filename, old, new)
        .split('\n')
        .skip(PREAMBLE_LINES)
        .collect::<Vec<_>>()
        .join("\n")
}
