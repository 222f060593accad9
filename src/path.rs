//! Folder path sanitizing and prefix helpers.
//!
//! Folder paths are plain `/`-separated relative strings. The empty string is
//! the group root. Everything that reaches the filesystem goes through
//! [`sanitize`] first.

/// Normalize a user-supplied folder path.
///
/// Backslashes become forward slashes, every `..` substring is stripped and
/// empty or `.` segments are dropped, so the result never has a leading or
/// trailing slash. Empty input stays empty (root).
pub fn sanitize(raw: &str) -> String {
    let forward = raw.replace('\\', "/");
    let stripped = forward.replace("..", "");

    stripped
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Join a parent folder and a child path, both already sanitized.
pub fn join(parent: &str, child: &str) -> String {
    match (parent.is_empty(), child.is_empty()) {
        (true, _) => child.to_string(),
        (false, true) => parent.to_string(),
        (false, false) => format!("{parent}/{child}"),
    }
}

/// Whether `folder` is `ancestor` itself or nested somewhere below it.
///
/// The match must end on a segment boundary: `docs2` is not inside `docs`.
pub fn is_within(folder: &str, ancestor: &str) -> bool {
    if ancestor.is_empty() {
        return true;
    }
    match folder.strip_prefix(ancestor) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Replace the `from` prefix of `folder` with `to`.
///
/// Returns `None` when `folder` is not within `from`.
pub fn replace_prefix(folder: &str, from: &str, to: &str) -> Option<String> {
    if !is_within(folder, from) {
        return None;
    }
    let rest = folder[from.len()..].trim_start_matches('/');
    Some(join(to, rest))
}

/// Reduce a display name to its final path segment.
///
/// Returns `None` if nothing usable is left (empty, `.` or `..`).
pub fn display_name(raw: &str) -> Option<String> {
    let forward = raw.replace('\\', "/");
    let last = forward.rsplit('/').next().unwrap_or("").trim();

    if last.is_empty() || last == "." || last == ".." || last.chars().any(|c| c.is_control()) {
        None
    } else {
        Some(last.to_string())
    }
}

/// Whether a client-supplied disk name is a single harmless path segment.
pub fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
        && !name.chars().any(|c| c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_empty_is_root() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("/"), "");
    }

    #[test]
    fn test_sanitize_strips_slashes() {
        assert_eq!(sanitize("/docs/"), "docs");
        assert_eq!(sanitize("docs/reports"), "docs/reports");
        assert_eq!(sanitize("//a//b//"), "a/b");
    }

    #[test]
    fn test_sanitize_backslashes() {
        assert_eq!(sanitize("a\\b\\c"), "a/b/c");
        assert_eq!(sanitize("\\a\\"), "a");
    }

    #[test]
    fn test_sanitize_rejects_traversal() {
        assert_eq!(sanitize("../../etc/passwd"), "etc/passwd");
        assert_eq!(sanitize("a/../b"), "a/b");
        assert_eq!(sanitize("..\\..\\secret"), "secret");
        assert_eq!(sanitize("...."), "");
        assert_eq!(sanitize("./a/./b"), "a/b");
        assert!(!sanitize(".../x/.....").contains(".."));
    }

    #[test]
    fn test_join() {
        assert_eq!(join("", "a"), "a");
        assert_eq!(join("a", ""), "a");
        assert_eq!(join("a", "b/c"), "a/b/c");
        assert_eq!(join("", ""), "");
    }

    #[test]
    fn test_is_within_segment_boundary() {
        assert!(is_within("docs", "docs"));
        assert!(is_within("docs/2024", "docs"));
        assert!(!is_within("docs2", "docs"));
        assert!(!is_within("doc", "docs"));
        assert!(is_within("anything", ""));
    }

    #[test]
    fn test_replace_prefix() {
        assert_eq!(
            replace_prefix("docs", "docs", "archive").as_deref(),
            Some("archive")
        );
        assert_eq!(
            replace_prefix("docs/2024/q1", "docs", "archive/old").as_deref(),
            Some("archive/old/2024/q1")
        );
        assert_eq!(replace_prefix("docs2", "docs", "archive"), None);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("notes.txt").as_deref(), Some("notes.txt"));
        assert_eq!(display_name("../../notes.txt").as_deref(), Some("notes.txt"));
        assert_eq!(display_name("C:\\Users\\a\\b.pdf").as_deref(), Some("b.pdf"));
        assert_eq!(display_name(""), None);
        assert_eq!(display_name("dir/"), None);
        assert_eq!(display_name(".."), None);
    }

    #[test]
    fn test_is_safe_file_name() {
        assert!(is_safe_file_name("1700000000000-notes.txt"));
        assert!(!is_safe_file_name(""));
        assert!(is_safe_file_name("1700000000000-v1..2.txt"));
        assert!(!is_safe_file_name(".."));
        assert!(!is_safe_file_name("../x"));
        assert!(!is_safe_file_name("a/b"));
        assert!(!is_safe_file_name("a\\b"));
    }
}
