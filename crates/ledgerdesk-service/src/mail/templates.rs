//! Plain-text message bodies.

use ledgerdesk_core::traits::MailMessage;
use ledgerdesk_entity::user::User;

/// Welcome message for a newly provisioned portal account.
///
/// The temporary password is included only when the server generated it.
pub fn welcome(user: &User, temporary_password: Option<&str>, portal_url: &str) -> MailMessage {
    let mut body = format!(
        "Hello {name},\n\n\
         An account has been created for you on our client portal.\n\n\
         Sign in at: {portal_url}\n\
         Email: {email}\n",
        name = user.name,
        email = user.email,
    );
    if let Some(password) = temporary_password {
        body.push_str(&format!(
            "Temporary password: {password}\n\n\
             Please change this password after your first sign-in.\n"
        ));
    }
    body.push_str("\nIf you have questions, reply to this email.\n");

    MailMessage {
        to: user.email.clone(),
        subject: "Your client portal account".to_string(),
        body,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use ledgerdesk_entity::user::UserRole;
    use uuid::Uuid;

    use super::*;

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Morgan Lee".into(),
            email: "morgan@acme.test".into(),
            password_hash: None,
            role: UserRole::Client,
            company: Some("Acme".into()),
            phone: None,
            image_url: None,
            failed_login_attempts: 0,
            locked_until: None,
            last_login_at: None,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_welcome_with_password() {
        let msg = welcome(&user(), Some("Xy7!temporary"), "https://portal.test");
        assert_eq!(msg.to, "morgan@acme.test");
        assert!(msg.body.contains("Hello Morgan Lee"));
        assert!(msg.body.contains("https://portal.test"));
        assert!(msg.body.contains("Temporary password: Xy7!temporary"));
    }

    #[test]
    fn test_welcome_without_password() {
        let msg = welcome(&user(), None, "https://portal.test");
        assert!(!msg.body.contains("Temporary password"));
    }
}
