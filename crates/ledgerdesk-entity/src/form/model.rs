//! Form entity model.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::field::FormField;

/// A questionnaire built by an admin and filled in by clients.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Form {
    /// Unique form identifier.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Intro text.
    pub description: Option<String>,
    /// Visible to clients.
    pub is_published: bool,
    /// Field IDs in display order.
    pub field_order: Vec<Uuid>,
    /// The admin who built the form.
    pub created_by: Option<Uuid>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// A form with its response count (admin listing).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FormSummary {
    /// The form row.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub form: Form,
    /// Number of responses received.
    pub response_count: i64,
}

/// A published form as listed to a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientFormSummary {
    /// The form row.
    #[serde(flatten)]
    pub form: Form,
    /// Whether the caller already responded.
    pub submitted: bool,
}

/// Data required to create a form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateForm {
    /// Title.
    pub title: String,
    /// Intro text.
    pub description: Option<String>,
    /// Creating admin.
    pub created_by: Option<Uuid>,
}

/// Form metadata edits. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateForm {
    /// New title.
    pub title: Option<String>,
    /// New description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
}

/// A form together with its fields in display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormDetail {
    /// The form row.
    #[serde(flatten)]
    pub form: Form,
    /// Ordered fields.
    pub fields: Vec<FormField>,
}

impl FormDetail {
    /// Combine a form with its fields, ordering them by `field_order`.
    ///
    /// Fields missing from `field_order` go last, oldest first. IDs in
    /// `field_order` with no matching field are skipped.
    pub fn assemble(form: Form, fields: Vec<FormField>) -> Self {
        let mut by_id: HashMap<Uuid, FormField> =
            fields.into_iter().map(|f| (f.id(), f)).collect();

        let mut ordered = Vec::with_capacity(by_id.len());
        for id in &form.field_order {
            if let Some(field) = by_id.remove(id) {
                ordered.push(field);
            }
        }

        let mut orphans: Vec<FormField> = by_id.into_values().collect();
        orphans.sort_by_key(|f| (f.created_at(), f.id()));
        ordered.extend(orphans);

        Self {
            form,
            fields: ordered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::field::SeparatorField;

    fn separator(form_id: Uuid, label: &str, offset: i64) -> FormField {
        FormField::Separator(SeparatorField {
            id: Uuid::new_v4(),
            form_id,
            label: label.into(),
            description: None,
            created_at: Utc::now() + chrono::Duration::seconds(offset),
        })
    }

    #[test]
    fn test_assemble_follows_field_order() {
        let form_id = Uuid::new_v4();
        let a = separator(form_id, "a", 0);
        let b = separator(form_id, "b", 1);
        let c = separator(form_id, "c", 2);
        let orphan = separator(form_id, "orphan", 3);

        let form = Form {
            id: form_id,
            title: "Intake".into(),
            description: None,
            is_published: true,
            field_order: vec![c.id(), Uuid::new_v4(), a.id(), b.id()],
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let detail = FormDetail::assemble(form, vec![orphan, a, b, c]);
        let labels: Vec<&str> = detail.fields.iter().map(|f| f.label()).collect();
        assert_eq!(labels, vec!["c", "a", "b", "orphan"]);
    }
}
