//! Request DTOs with validation.
//!
//! Bodies that only pass through to a service are deserialized straight
//! into the service's request type. The types here carry `validator`
//! rules or query-string shapes that belong to the HTTP surface.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use ledgerdesk_entity::contact::CreateContactRequest;
use ledgerdesk_entity::file::FileScope;
use ledgerdesk_entity::user::UserRole;
use ledgerdesk_service::user::admin::{
    AdminUpdateUserRequest, CreateUserRequest as SvcCreateUser,
};

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

/// OAuth login body: the provider access token obtained by the frontend.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OAuthLoginRequest {
    /// Provider access token.
    #[validate(length(min = 1, message = "is required"))]
    pub access_token: String,
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1, message = "is required"))]
    pub current_password: String,
    /// New password.
    #[validate(length(min = 1, message = "is required"))]
    pub new_password: String,
}

/// Admin password reset.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetPasswordRequest {
    /// New password.
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

/// Create user request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Full name.
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: String,
    /// Login email.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Role, client when absent.
    #[serde(default = "default_role")]
    pub role: UserRole,
    /// Company.
    pub company: Option<String>,
    /// Phone.
    pub phone: Option<String>,
    /// Initial password. A temporary one is generated when absent.
    pub password: Option<String>,
}

fn default_role() -> UserRole {
    UserRole::Client
}

impl From<CreateUserRequest> for SvcCreateUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            role: req.role,
            company: req.company,
            phone: req.phone,
            password: req.password.filter(|p| !p.is_empty()),
        }
    }
}

/// Update user request (admin).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// Full name.
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: Option<String>,
    /// Login email.
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    /// Role.
    pub role: Option<UserRole>,
    /// Company.
    pub company: Option<String>,
    /// Phone.
    pub phone: Option<String>,
}

impl From<UpdateUserRequest> for AdminUpdateUserRequest {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            role: req.role,
            company: req.company,
            phone: req.phone,
        }
    }
}

/// Admin user list filters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserSearchQuery {
    /// Matches name, email, or company.
    pub search: Option<String>,
    /// Only this role.
    pub role: Option<UserRole>,
}

/// Public contact form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactFormRequest {
    /// Sender name.
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: String,
    /// Sender email.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Sender phone.
    #[validate(length(max = 50, message = "is too long"))]
    pub phone: Option<String>,
    /// Sender company.
    #[validate(length(max = 200, message = "is too long"))]
    pub company: Option<String>,
    /// Service of interest.
    #[validate(length(max = 200, message = "is too long"))]
    pub service: Option<String>,
    /// Message body.
    #[validate(length(min = 1, max = 5000, message = "must be 1-5000 characters"))]
    pub message: String,
}

impl From<ContactFormRequest> for CreateContactRequest {
    fn from(req: ContactFormRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone: req.phone,
            company: req.company,
            service: req.service,
            message: req.message,
        }
    }
}

/// Contact request list filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactListQuery {
    /// Only open (`true`) or closed (`false`) requests.
    pub is_open: Option<bool>,
}

/// Which of the caller's files to list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileScopeQuery {
    /// Uploaded, received, or all.
    #[serde(default)]
    pub scope: FileScope,
}

/// Archive-state filter for folder views.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArchivedQuery {
    /// Only archived (`true`) or active (`false`) files.
    pub archived: Option<bool>,
}

/// A folder path in the query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolderPathQuery {
    /// Folder path, root when empty.
    #[serde(default)]
    pub path: String,
    /// Archive-state filter.
    pub archived: Option<bool>,
}

/// Move a folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameFolderRequest {
    /// Current path.
    pub path: String,
    /// Target path.
    pub new_path: String,
}

/// Archive or restore a folder subtree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveFolderRequest {
    /// Folder path.
    pub path: String,
    /// New archive state.
    pub archived: bool,
}

/// New field order for a form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderFieldsRequest {
    /// Every field ID of the form, in display order.
    pub field_ids: Vec<Uuid>,
}

/// A client's answers keyed by field ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponseRequest {
    /// Field ID to answer value.
    pub answers: HashMap<Uuid, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_validation() {
        let ok = LoginRequest {
            email: "jane@example.com".to_string(),
            password: "secret".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = LoginRequest {
            email: "jane".to_string(),
            password: String::new(),
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_create_user_defaults_to_client() {
        let req: CreateUserRequest =
            serde_json::from_str(r#"{"name": "Jane", "email": "jane@example.com", "password": ""}"#)
                .unwrap();
        assert_eq!(req.role, UserRole::Client);

        let svc = SvcCreateUser::from(req);
        assert!(svc.password.is_none());
    }

    #[test]
    fn test_contact_message_required() {
        let req = ContactFormRequest {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            phone: None,
            company: None,
            service: Some("Bookkeeping".to_string()),
            message: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_file_scope_defaults_to_all() {
        let query: FileScopeQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.scope, FileScope::default());
    }
}
