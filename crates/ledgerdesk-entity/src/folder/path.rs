//! Virtual folder path algebra.
//!
//! Folders are not rows. A file's `folder_name` holds a `/`-separated
//! path (`"Clients/Acme/2024"`, `""` for the root) and folders are
//! whatever prefixes those paths share. Every rule that decides whether
//! a row belongs to a folder goes through this module so the SQL side
//! (see the folder repository) and the Rust side agree:
//!
//! * matching is exact and case-sensitive,
//! * it respects segment boundaries: `Tax` contains `Tax` and `Tax/2024`
//!   but not `Taxes`.

use ledgerdesk_core::error::AppError;

/// Separator between path segments.
pub const SEPARATOR: char = '/';

/// Maximum length of a single segment in bytes.
pub const MAX_SEGMENT_LEN: usize = 255;

/// Normalize user input into a canonical folder path.
///
/// Trims whitespace around every segment, drops empty segments produced
/// by leading, trailing, or repeated slashes, and rejects `.`/`..` and
/// control characters. The root is the empty string.
pub fn normalize(input: &str) -> Result<String, AppError> {
    let mut segments = Vec::new();

    for raw in input.split(SEPARATOR) {
        let segment = raw.trim();
        if segment.is_empty() {
            continue;
        }
        if segment == "." || segment == ".." {
            return Err(AppError::validation(format!(
                "Folder path may not contain '{segment}'"
            )));
        }
        if segment.chars().any(char::is_control) {
            return Err(AppError::validation(
                "Folder path may not contain control characters",
            ));
        }
        if segment.len() > MAX_SEGMENT_LEN {
            return Err(AppError::validation(format!(
                "Folder name exceeds {MAX_SEGMENT_LEN} bytes"
            )));
        }
        segments.push(segment);
    }

    Ok(segments.join("/"))
}

/// Whether `path` is the root folder.
pub fn is_root(path: &str) -> bool {
    path.is_empty()
}

/// Whether a row whose folder is `path` lies in the subtree of `folder`.
///
/// Both arguments must already be normalized.
pub fn is_in_subtree(path: &str, folder: &str) -> bool {
    if folder.is_empty() {
        return true;
    }
    match path.strip_prefix(folder) {
        Some("") => true,
        Some(rest) => rest.starts_with(SEPARATOR),
        None => false,
    }
}

/// Replace the `old` prefix of `path` with `new`.
///
/// Returns `None` when `path` is not inside `old`.
pub fn rebase(path: &str, old: &str, new: &str) -> Option<String> {
    if !is_in_subtree(path, old) {
        return None;
    }
    let rest = &path[old.len()..];
    let rest = rest.trim_start_matches(SEPARATOR);
    Some(join(new, rest))
}

/// Join two normalized paths.
pub fn join(parent: &str, child: &str) -> String {
    match (parent.is_empty(), child.is_empty()) {
        (true, _) => child.to_string(),
        (false, true) => parent.to_string(),
        (false, false) => format!("{parent}{SEPARATOR}{child}"),
    }
}

/// The parent folder of `path`, or `None` for the root.
pub fn parent(path: &str) -> Option<&str> {
    if path.is_empty() {
        return None;
    }
    Some(path.rsplit_once(SEPARATOR).map(|(p, _)| p).unwrap_or(""))
}

/// The last segment of `path` (empty for the root).
pub fn name(path: &str) -> &str {
    path.rsplit_once(SEPARATOR).map(|(_, n)| n).unwrap_or(path)
}

/// Iterate over the segments of a normalized path.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(SEPARATOR).filter(|s| !s.is_empty())
}

/// Check that a folder rename from `from` to `to` is structurally valid.
///
/// Both paths must be normalized. Existence checks happen against the
/// database.
pub fn check_rename(from: &str, to: &str) -> Result<(), AppError> {
    if is_root(from) {
        return Err(AppError::validation("The root folder cannot be renamed"));
    }
    if is_root(to) {
        return Err(AppError::validation("Target folder path cannot be empty"));
    }
    if from == to {
        return Err(AppError::validation(
            "Target folder is the same as the source folder",
        ));
    }
    if is_in_subtree(to, from) {
        return Err(AppError::validation(
            "Cannot move a folder into its own subfolder",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("").unwrap(), "");
        assert_eq!(normalize("/").unwrap(), "");
        assert_eq!(normalize(" Clients / Acme ").unwrap(), "Clients/Acme");
        assert_eq!(normalize("//Clients///Acme/").unwrap(), "Clients/Acme");
        assert!(normalize("Clients/../etc").is_err());
        assert!(normalize("Clients/./Acme").is_err());
        assert!(normalize("Bad\u{0}Name").is_err());
    }

    #[test]
    fn test_normalize_keeps_case() {
        assert_eq!(normalize("Tax/IRS").unwrap(), "Tax/IRS");
        assert_ne!(normalize("tax").unwrap(), normalize("Tax").unwrap());
    }

    #[test]
    fn test_subtree_respects_boundaries() {
        assert!(is_in_subtree("Tax", "Tax"));
        assert!(is_in_subtree("Tax/2024", "Tax"));
        assert!(is_in_subtree("Tax/2024/Q1", "Tax"));
        assert!(!is_in_subtree("Taxes", "Tax"));
        assert!(!is_in_subtree("Taxes/2024", "Tax"));
        assert!(!is_in_subtree("tax/2024", "Tax"));
        assert!(is_in_subtree("anything", ""));
        assert!(!is_in_subtree("", "Tax"));
    }

    #[test]
    fn test_rebase() {
        assert_eq!(rebase("Tax", "Tax", "Taxes").as_deref(), Some("Taxes"));
        assert_eq!(
            rebase("Tax/2024/Q1", "Tax", "Archive/Tax").as_deref(),
            Some("Archive/Tax/2024/Q1")
        );
        assert_eq!(rebase("Taxes/2024", "Tax", "X"), None);
        assert_eq!(rebase("A/B", "", "Root").as_deref(), Some("Root/A/B"));
    }

    #[test]
    fn test_parent_and_name() {
        assert_eq!(parent("A/B/C"), Some("A/B"));
        assert_eq!(parent("A"), Some(""));
        assert_eq!(parent(""), None);
        assert_eq!(name("A/B/C"), "C");
        assert_eq!(name("A"), "A");
        assert_eq!(join("", "A"), "A");
        assert_eq!(join("A", "B"), "A/B");
        assert_eq!(segments("A/B").collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn test_check_rename() {
        assert!(check_rename("Tax", "Taxes").is_ok());
        assert!(check_rename("Tax", "Archive/Tax").is_ok());
        assert!(check_rename("", "X").is_err());
        assert!(check_rename("Tax", "").is_err());
        assert!(check_rename("Tax", "Tax").is_err());
        assert!(check_rename("Tax", "Tax/Old").is_err());
        // A sibling sharing a textual prefix is not a descendant.
        assert!(check_rename("Tax", "Taxes/Old").is_ok());
    }
}
