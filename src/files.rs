//! Rendering of file listings for the model
//!
//! Entries are listed top-down so a directory always precedes its own
//! descendants. A listing cut short by an upstream limit still shows which
//! directories exist and can be explored further.

use std::cmp::Ordering;
use std::path::{Component, Path};

use tracing::debug;

pub const NO_FILES_FOUND: &str = "No files found.";

pub const TRUNCATION_NOTICE: &str =
    "(File list truncated. Use list_files on specific subdirectories if you need to explore further.)";

/// Ordering applied to two path segments that differ
pub trait SegmentOrder {
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

/// Case-insensitive ordering where digit runs compare by numeric value,
/// so `file2` sorts before `file10`.
///
/// Characters rank as whitespace, then punctuation and symbols (in
/// [`PUNCTUATION_ORDER`]), then digits, then letters.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalOrder;

impl SegmentOrder for NaturalOrder {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        let mut a_chunks = Chunks::new(a);
        let mut b_chunks = Chunks::new(b);

        loop {
            let ordering = match (a_chunks.next(), b_chunks.next()) {
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                (Some(Chunk::Digits(x)), Some(Chunk::Digits(y))) => compare_digits(x, y),
                (Some(Chunk::Digits(_)), Some(Chunk::Text(y))) => {
                    DIGIT_CLASS.cmp(&leading_class(y))
                }
                (Some(Chunk::Text(x)), Some(Chunk::Digits(_))) => {
                    leading_class(x).cmp(&DIGIT_CLASS)
                }
                (Some(Chunk::Text(x)), Some(Chunk::Text(y))) => compare_folded(x, y),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
    }
}

enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

/// Splits a segment into alternating runs of ASCII digits and other text
struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Chunks<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Chunk<'a>> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != digits)
            .map_or(self.rest.len(), |(i, _)| i);

        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(if digits {
            Chunk::Digits(chunk)
        } else {
            Chunk::Text(chunk)
        })
    }
}

fn compare_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Punctuation and symbols in collation order; all of them sort before digits
pub const PUNCTUATION_ORDER: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

const WHITESPACE_CLASS: u8 = 0;
const PUNCTUATION_CLASS: u8 = 1;
const SYMBOL_CLASS: u8 = 2;
const DIGIT_CLASS: u8 = 3;
const LETTER_CLASS: u8 = 4;

/// Collation key of a single (already lowercased) character
fn char_key(c: char) -> (u8, u32) {
    if c.is_whitespace() {
        (WHITESPACE_CLASS, c as u32)
    } else if let Some(rank) = PUNCTUATION_ORDER.chars().position(|p| p == c) {
        (PUNCTUATION_CLASS, rank as u32)
    } else if c.is_ascii_digit() {
        (DIGIT_CLASS, c as u32)
    } else if c.is_alphanumeric() {
        (LETTER_CLASS, c as u32)
    } else {
        (SYMBOL_CLASS, c as u32)
    }
}

fn leading_class(text: &str) -> u8 {
    text.chars().next().map_or(LETTER_CLASS, |c| char_key(c).0)
}

fn compare_folded(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .map(char_key)
        .cmp(b.chars().flat_map(char::to_lowercase).map(char_key))
}

/// Order two `/`-separated relative paths so that directories come right
/// before their descendants.
pub fn compare_paths(a: &str, b: &str, order: &impl SegmentOrder) -> Ordering {
    let a_parts: Vec<&str> = a.split('/').collect();
    let b_parts: Vec<&str> = b.split('/').collect();

    for (i, (a_part, b_part)) in a_parts.iter().zip(&b_parts).enumerate() {
        if a_part != b_part {
            if i + 1 == a_parts.len() && i + 1 < b_parts.len() {
                return Ordering::Less;
            }
            if i + 1 == b_parts.len() && i + 1 < a_parts.len() {
                return Ordering::Greater;
            }
            return order.compare(a_part, b_part);
        }
    }

    a_parts.len().cmp(&b_parts.len())
}

/// Render `files` relative to `root`, one per line.
pub fn format_files_list(root: &str, files: &[String], did_hit_limit: bool) -> String {
    format_files_list_with(root, files, did_hit_limit, &NaturalOrder)
}

/// Same as [`format_files_list`] with a caller-chosen segment ordering
pub fn format_files_list_with(
    root: &str,
    files: &[String],
    did_hit_limit: bool,
    order: &impl SegmentOrder,
) -> String {
    let mut sorted: Vec<String> = files
        .iter()
        .map(|file| {
            let relative = relative_posix(root, file);
            if is_dir_marked(file) {
                relative + "/"
            } else {
                relative
            }
        })
        .collect();
    sorted.sort_by(|a, b| compare_paths(a, b, order));

    debug!(
        "Formatted {} file entries (limit hit: {})",
        sorted.len(),
        did_hit_limit
    );

    if did_hit_limit {
        format!("{}\n\n{}", sorted.join("\n"), TRUNCATION_NOTICE)
    } else if sorted.is_empty() || (sorted.len() == 1 && sorted[0].is_empty()) {
        NO_FILES_FOUND.to_string()
    } else {
        sorted.join("\n")
    }
}

fn is_dir_marked(path: &str) -> bool {
    path.ends_with('/') || path.ends_with('\\')
}

fn to_posix(path: &str) -> String {
    path.replace('\\', "/")
}

/// Relative path from `root` to `path` with `/` separators, stepping out of
/// the root with `..` when `path` lies elsewhere.
fn relative_posix(root: &str, path: &str) -> String {
    let root = to_posix(root);
    let path = to_posix(path);
    let root_parts = normal_parts(&root);
    let path_parts = normal_parts(&path);

    let common = root_parts
        .iter()
        .zip(&path_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = vec![".."; root_parts.len() - common];
    parts.extend(&path_parts[common..]);
    parts.join("/")
}

fn normal_parts(path: &str) -> Vec<&str> {
    let mut parts: Vec<&str> = Vec::new();
    for component in Path::new(path).components() {
        match component {
            Component::Normal(part) => {
                if let Some(part) = part.to_str() {
                    parts.push(part);
                }
            }
            Component::ParentDir => {
                parts.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_natural_order() {
        let order = NaturalOrder;
        assert_eq!(order.compare("file2", "file10"), Ordering::Less);
        assert_eq!(order.compare("file10", "file2"), Ordering::Greater);
        assert_eq!(order.compare("Readme.md", "readme.md"), Ordering::Equal);
        assert_eq!(order.compare("apple", "Banana"), Ordering::Less);
        assert_eq!(order.compare("v007", "v7"), Ordering::Equal);
        assert_eq!(order.compare("a", "ab"), Ordering::Less);
        assert_eq!(order.compare("", "a"), Ordering::Less);
    }

    #[test]
    fn test_punctuation_sorts_before_digits_and_letters() {
        let order = NaturalOrder;
        assert_eq!(order.compare("_config.yml", "404.html"), Ordering::Less);
        assert_eq!(order.compare("404.html", "_config.yml"), Ordering::Greater);
        assert_eq!(order.compare("a_b", "a-b"), Ordering::Less);
        assert_eq!(order.compare("a-b", "a.b"), Ordering::Less);
        assert_eq!(order.compare("a.b", "ab"), Ordering::Less);
        assert_eq!(order.compare("a b", "a_b"), Ordering::Less);
        assert_eq!(order.compare("v1.2", "v1a"), Ordering::Less);
        assert_eq!(order.compare("~tmp", "$cash"), Ordering::Less);
    }

    #[test]
    fn test_listing_with_punctuated_names() {
        let files = paths(&[
            "/r/404.html",
            "/r/_config.yml",
            "/r/.github/",
            "/r/a-b",
            "/r/a_b",
            "/r/a.b",
        ]);
        assert_eq!(
            format_files_list("/r", &files, false),
            "_config.yml\n404.html\na_b\na-b\na.b\n.github/"
        );
    }

    #[test]
    fn test_directory_precedes_descendants() {
        let files = paths(&[
            "/repo/src/main.rs",
            "/repo/src/",
            "/repo/Cargo.toml",
            "/repo/src/bin/",
            "/repo/src/bin/tool.rs",
            "/repo/README.md",
        ]);

        let listing = format_files_list("/repo", &files, false);
        assert_eq!(
            listing,
            "Cargo.toml\nREADME.md\nsrc/\nsrc/main.rs\nsrc/bin/\nsrc/bin/tool.rs"
        );
    }

    #[test]
    fn test_shallower_path_sorts_first_at_branch_point() {
        assert_eq!(
            compare_paths("zeta.txt", "alpha/inner.txt", &NaturalOrder),
            Ordering::Less
        );
        assert_eq!(
            compare_paths("alpha/inner.txt", "zeta.txt", &NaturalOrder),
            Ordering::Greater
        );
        assert_eq!(compare_paths("a", "a/b", &NaturalOrder), Ordering::Less);
    }

    #[test]
    fn test_numeric_segments() {
        let files = paths(&["/p/file10.txt", "/p/file2.txt", "/p/file1.txt"]);
        assert_eq!(
            format_files_list("/p", &files, false),
            "file1.txt\nfile2.txt\nfile10.txt"
        );
    }

    #[test]
    fn test_empty_listing() {
        assert_eq!(format_files_list("/repo", &[], false), NO_FILES_FOUND);
        assert_eq!(
            format_files_list("/repo", &paths(&["/repo"]), false),
            NO_FILES_FOUND
        );
    }

    #[test]
    fn test_truncation_notice_is_appended() {
        let files = paths(&["/repo/b.rs", "/repo/a.rs"]);
        let listing = format_files_list("/repo", &files, true);
        assert_eq!(listing, format!("a.rs\nb.rs\n\n{}", TRUNCATION_NOTICE));
        assert!(listing.ends_with(TRUNCATION_NOTICE));
    }

    #[test]
    fn test_listing_is_deterministic() {
        let files = paths(&["/r/b/", "/r/a", "/r/b/c", "/r/B2", "/r/b10"]);
        let mut reversed = files.clone();
        reversed.reverse();

        let first = format_files_list("/r", &files, false);
        assert_eq!(first, "a\nB2\nb10\nb/\nb/c");
        assert_eq!(first, format_files_list("/r", &files, false));
        assert_eq!(first, format_files_list("/r", &reversed, false));
    }

    #[test]
    fn test_backslashes_are_normalized() {
        let files = paths(&["C:\\work\\src\\", "C:\\work\\src\\lib.rs"]);
        assert_eq!(format_files_list("C:\\work", &files, false), "src/\nsrc/lib.rs");
    }

    #[test]
    fn test_paths_outside_root() {
        assert_eq!(relative_posix("/repo/app", "/repo/lib/x.rs"), "../lib/x.rs");
        assert_eq!(relative_posix("/repo", "/repo"), "");
    }

    struct ReverseOrder;

    impl SegmentOrder for ReverseOrder {
        fn compare(&self, a: &str, b: &str) -> Ordering {
            b.cmp(a)
        }
    }

    #[test]
    fn test_custom_segment_order() {
        let files = paths(&["/r/a.rs", "/r/c.rs", "/r/b.rs"]);
        assert_eq!(
            format_files_list_with("/r", &files, false, &ReverseOrder),
            "c.rs\nb.rs\na.rs"
        );
    }
}
