use std::ops::Range;
use std::path::Path;

/// Format used by Edit > Time/Date.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A literal match, as a byte range into the searched text.
pub type Match = Range<usize>;

/// Result of a replace-all request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplaceOutcome {
    Replaced { text: String, count: usize },
    NotFound,
}

/// Extract filename from a file path
///
/// Returns the filename component of a path, or "Unknown" if it can't be extracted.
pub fn extract_filename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|s| !s.is_empty() && *s != ".")
        .map(|s| s.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// First occurrence of `needle`, scanning from the start.
///
/// Case-sensitive literal match. An empty needle never matches.
pub fn find(text: &str, needle: &str) -> Option<Match> {
    find_next(text, needle, 0)
}

/// Next occurrence of `needle` at or after byte `from`.
pub fn find_next(text: &str, needle: &str, from: usize) -> Option<Match> {
    if needle.is_empty() || from >= text.len() || !text.is_char_boundary(from) {
        return None;
    }

    text[from..]
        .find(needle)
        .map(|pos| from + pos..from + pos + needle.len())
}

/// Every non-overlapping occurrence, left to right.
///
/// After a hit the scan resumes past the whole match, so "aaa" holds one
/// "aa", not two.
pub fn find_all(text: &str, needle: &str) -> Vec<Match> {
    if needle.is_empty() {
        return Vec::new();
    }
    text.match_indices(needle)
        .map(|(pos, m)| pos..pos + m.len())
        .collect()
}

/// Replace every occurrence of `needle` with `replacement`.
///
/// Reports `NotFound` (and builds nothing) when there is no occurrence.
pub fn replace_all(text: &str, needle: &str, replacement: &str) -> ReplaceOutcome {
    let count = find_all(text, needle).len();
    if count == 0 {
        return ReplaceOutcome::NotFound;
    }
    ReplaceOutcome::Replaced {
        text: text.replace(needle, replacement),
        count,
    }
}

/// Current local time in [`TIMESTAMP_FORMAT`].
pub fn timestamp_now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_filename_from_path() {
        assert_eq!(extract_filename("/home/user/test.txt"), "test.txt");
        assert_eq!(extract_filename("/home/user/run.bat"), "run.bat");
        assert_eq!(extract_filename("test.txt"), "test.txt");
    }

    #[test]
    fn test_extract_filename_edge_cases() {
        assert_eq!(extract_filename("/home/user/"), "user");
        assert_eq!(extract_filename(""), "Unknown");
        assert_eq!(extract_filename("."), "Unknown");
        assert_eq!(extract_filename("/"), "Unknown");
    }

    #[test]
    fn test_find_first() {
        let text = "cat dog cat";
        assert_eq!(find(text, "cat"), Some(0..3));
        assert_eq!(find(text, "dog"), Some(4..7));
    }

    #[test]
    fn test_find_is_case_sensitive() {
        assert_eq!(find("Hello hello", "hello"), Some(6..11));
        assert_eq!(find("Hello", "HELLO"), None);
    }

    #[test]
    fn test_find_is_literal() {
        assert_eq!(find("a.c abc", "a.c"), Some(0..3));
        assert_eq!(find("abc", ".*"), None);
    }

    #[test]
    fn test_find_empty_needle() {
        assert_eq!(find("hello", ""), None);
        assert!(find_all("hello", "").is_empty());
    }

    #[test]
    fn test_find_next_from_position() {
        let text = "cat dog cat mouse cat";
        assert_eq!(find_next(text, "cat", 1), Some(8..11));
        assert_eq!(find_next(text, "cat", 19), None);
        assert_eq!(find_next(text, "cat", 100), None);
    }

    #[test]
    fn test_find_all_counts_non_overlapping() {
        assert_eq!(find_all("aXaXa", "a").len(), 3);
        assert_eq!(find_all("aaa", "aa"), vec![0..2]);
        assert_eq!(find_all("aaaa", "aa"), vec![0..2, 2..4]);
    }

    #[test]
    fn test_find_all_none() {
        assert!(find_all("hello world", "rust").is_empty());
    }

    #[test]
    fn test_replace_all_with_empty() {
        assert_eq!(
            replace_all("aXbXc", "X", ""),
            ReplaceOutcome::Replaced { text: "abc".to_string(), count: 2 }
        );
    }

    #[test]
    fn test_replace_all_not_found() {
        assert_eq!(replace_all("hello world", "rust", "crab"), ReplaceOutcome::NotFound);
        assert_eq!(replace_all("hello world", "", "x"), ReplaceOutcome::NotFound);
    }

    #[test]
    fn test_replace_with_containing_replacement() {
        assert_eq!(
            replace_all("a b", "a", "aa"),
            ReplaceOutcome::Replaced { text: "aa b".to_string(), count: 1 }
        );
    }

    #[test]
    fn test_unicode() {
        let text = "Hello 世界 world 世界";
        assert_eq!(find(text, "世界"), Some(6..12));
        assert_eq!(find_all(text, "世界").len(), 2);
        // Offset inside a multi-byte char is rejected, not a panic
        assert_eq!(find_next(text, "world", 7), None);
    }

    #[test]
    fn test_timestamp_shape() {
        let ts = timestamp_now();
        assert_eq!(ts.len(), 19);
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], " ");
        assert_eq!(&ts[13..14], ":");
    }
}
