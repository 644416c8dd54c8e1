//! Object key layout.
//!
//! Client uploads land under `uploads/{user_id}/`, so the registration
//! step can check that a key was issued to the caller.

use uuid::Uuid;

/// Top-level prefix for uploaded objects.
pub const UPLOAD_PREFIX: &str = "uploads";

const MAX_NAME_LEN: usize = 128;

/// Prefix all of a user's uploads share.
pub fn user_prefix(user_id: Uuid) -> String {
    format!("{UPLOAD_PREFIX}/{user_id}/")
}

/// A fresh, collision-free key for a file the user is about to upload.
pub fn upload_key(user_id: Uuid, filename: &str) -> String {
    format!(
        "{}{}-{}",
        user_prefix(user_id),
        Uuid::new_v4(),
        sanitize_filename(filename)
    )
}

/// Whether `key` was issued to `user_id` by [`upload_key`].
pub fn is_owned_by(key: &str, user_id: Uuid) -> bool {
    let Some(rest) = key.strip_prefix(&user_prefix(user_id)) else {
        return false;
    };
    !rest.is_empty() && !rest.contains('/') && !rest.contains("..")
}

/// Reduce a display filename to a safe key segment.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len().min(MAX_NAME_LEN));
    let mut last_underscore = false;
    for c in name.trim().chars() {
        let keep = c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_');
        if keep {
            out.push(c);
            last_underscore = c == '_';
        } else if !last_underscore {
            out.push('_');
            last_underscore = true;
        }
        if out.len() >= MAX_NAME_LEN {
            break;
        }
    }
    let trimmed = out
        .trim_start_matches(['.', '_'])
        .trim_end_matches('_');
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}

/// `Content-Disposition` value that makes a download save as `filename`.
pub fn attachment_disposition(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '_',
        })
        .collect();
    format!("attachment; filename=\"{ascii}\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_key_layout() {
        let user = Uuid::new_v4();
        let key = upload_key(user, "2023 W-2 (final).pdf");
        assert!(key.starts_with(&format!("uploads/{user}/")));
        assert!(key.ends_with("-2023_W-2_final_.pdf"));
        assert!(is_owned_by(&key, user));
        assert!(!is_owned_by(&key, Uuid::new_v4()));
    }

    #[test]
    fn test_is_owned_by_rejects_traversal() {
        let user = Uuid::new_v4();
        assert!(!is_owned_by(&format!("uploads/{user}/"), user));
        assert!(!is_owned_by(&format!("uploads/{user}/../x"), user));
        assert!(!is_owned_by(&format!("uploads/{user}/a/b"), user));
        assert!(!is_owned_by("uploads/other/x", user));
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("report.pdf"), "report.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize_filename("  résumé  final.docx"), "r_sum_final.docx");
        assert_eq!(sanitize_filename("???"), "file");
        assert!(sanitize_filename(&"x".repeat(500)).len() <= MAX_NAME_LEN);
    }

    #[test]
    fn test_attachment_disposition() {
        assert_eq!(
            attachment_disposition("Q1 \"draft\".xlsx"),
            "attachment; filename=\"Q1 _draft_.xlsx\""
        );
    }
}
