//! Polymorphic form fields.
//!
//! Every field kind has its own table; [`FormField`] is the tagged union
//! handed to clients. [`FieldDefinition`] is the kind-specific payload an
//! admin submits when adding or editing a field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use ledgerdesk_core::error::AppError;

/// Smallest allowed rating scale.
pub const MIN_RATING_SCALE: i32 = 2;
/// Largest allowed rating scale.
pub const MAX_RATING_SCALE: i32 = 10;
/// Upper bound of the Net Promoter Score scale (lower bound is 0).
pub const NPS_MAX: i64 = 10;

/// Flavour of a free-text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "input_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    /// Single-line text.
    #[default]
    Text,
    /// Multi-line text.
    Textarea,
    /// Email address.
    Email,
    /// Numeric value.
    Number,
    /// Phone number.
    Phone,
    /// Calendar date (`YYYY-MM-DD`).
    Date,
}

/// Free-text input.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InputField {
    /// Field ID.
    pub id: Uuid,
    /// Owning form.
    pub form_id: Uuid,
    /// Question text.
    pub label: String,
    /// Whether an answer is mandatory.
    pub required: bool,
    /// Input flavour.
    pub input_type: InputType,
    /// Placeholder text.
    pub placeholder: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Single choice among options.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SelectionField {
    /// Field ID.
    pub id: Uuid,
    /// Owning form.
    pub form_id: Uuid,
    /// Question text.
    pub label: String,
    /// Whether an answer is mandatory.
    pub required: bool,
    /// Allowed values.
    pub options: Vec<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Checkbox/radio group.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MultipleChoiceField {
    /// Field ID.
    pub id: Uuid,
    /// Owning form.
    pub form_id: Uuid,
    /// Question text.
    pub label: String,
    /// Whether an answer is mandatory.
    pub required: bool,
    /// Allowed values.
    pub options: Vec<String>,
    /// Whether several options may be picked.
    pub allow_multiple: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Star rating from 1 to `max_rating`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RatingField {
    /// Field ID.
    pub id: Uuid,
    /// Owning form.
    pub form_id: Uuid,
    /// Question text.
    pub label: String,
    /// Whether an answer is mandatory.
    pub required: bool,
    /// Top of the scale.
    pub max_rating: i32,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Grid of rows, each answered with one column.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatrixField {
    /// Field ID.
    pub id: Uuid,
    /// Owning form.
    pub form_id: Uuid,
    /// Question text.
    pub label: String,
    /// Whether every row must be answered.
    pub required: bool,
    /// Row labels.
    pub rows: Vec<String>,
    /// Column labels.
    pub columns: Vec<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Net Promoter Score question (0..=10).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NetPromoterScoreField {
    /// Field ID.
    pub id: Uuid,
    /// Owning form.
    pub form_id: Uuid,
    /// Question text.
    pub label: String,
    /// Whether an answer is mandatory.
    pub required: bool,
    /// Caption under 0.
    pub low_label: Option<String>,
    /// Caption under 10.
    pub high_label: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Visual section break. Takes no answer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SeparatorField {
    /// Field ID.
    pub id: Uuid,
    /// Owning form.
    pub form_id: Uuid,
    /// Section title.
    pub label: String,
    /// Section description.
    pub description: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Discriminant of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// [`InputField`]
    Input,
    /// [`SelectionField`]
    Selection,
    /// [`MultipleChoiceField`]
    MultipleChoice,
    /// [`RatingField`]
    Rating,
    /// [`MatrixField`]
    Matrix,
    /// [`NetPromoterScoreField`]
    NetPromoterScore,
    /// [`SeparatorField`]
    Separator,
}

impl FieldKind {
    /// Table holding rows of this kind.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Input => "form_inputs",
            Self::Selection => "form_selections",
            Self::MultipleChoice => "form_multiple_choices",
            Self::Rating => "form_ratings",
            Self::Matrix => "form_matrices",
            Self::NetPromoterScore => "form_net_promoter_scores",
            Self::Separator => "form_separators",
        }
    }
}

/// A field of any kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormField {
    /// Free-text input.
    Input(InputField),
    /// Single choice.
    Selection(SelectionField),
    /// Multiple choice.
    MultipleChoice(MultipleChoiceField),
    /// Rating.
    Rating(RatingField),
    /// Matrix.
    Matrix(MatrixField),
    /// Net Promoter Score.
    NetPromoterScore(NetPromoterScoreField),
    /// Separator.
    Separator(SeparatorField),
}

impl FormField {
    /// Field ID.
    pub fn id(&self) -> Uuid {
        match self {
            Self::Input(f) => f.id,
            Self::Selection(f) => f.id,
            Self::MultipleChoice(f) => f.id,
            Self::Rating(f) => f.id,
            Self::Matrix(f) => f.id,
            Self::NetPromoterScore(f) => f.id,
            Self::Separator(f) => f.id,
        }
    }

    /// Question text.
    pub fn label(&self) -> &str {
        match self {
            Self::Input(f) => &f.label,
            Self::Selection(f) => &f.label,
            Self::MultipleChoice(f) => &f.label,
            Self::Rating(f) => &f.label,
            Self::Matrix(f) => &f.label,
            Self::NetPromoterScore(f) => &f.label,
            Self::Separator(f) => &f.label,
        }
    }

    /// Whether an answer is mandatory. Separators never are.
    pub fn required(&self) -> bool {
        match self {
            Self::Input(f) => f.required,
            Self::Selection(f) => f.required,
            Self::MultipleChoice(f) => f.required,
            Self::Rating(f) => f.required,
            Self::Matrix(f) => f.required,
            Self::NetPromoterScore(f) => f.required,
            Self::Separator(_) => false,
        }
    }

    /// Creation time.
    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Self::Input(f) => f.created_at,
            Self::Selection(f) => f.created_at,
            Self::MultipleChoice(f) => f.created_at,
            Self::Rating(f) => f.created_at,
            Self::Matrix(f) => f.created_at,
            Self::NetPromoterScore(f) => f.created_at,
            Self::Separator(f) => f.created_at,
        }
    }

    /// Discriminant.
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Input(_) => FieldKind::Input,
            Self::Selection(_) => FieldKind::Selection,
            Self::MultipleChoice(_) => FieldKind::MultipleChoice,
            Self::Rating(_) => FieldKind::Rating,
            Self::Matrix(_) => FieldKind::Matrix,
            Self::NetPromoterScore(_) => FieldKind::NetPromoterScore,
            Self::Separator(_) => FieldKind::Separator,
        }
    }
}

/// Admin-supplied definition of a field (no IDs or timestamps).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldDefinition {
    /// Free-text input.
    Input {
        /// Question text.
        label: String,
        /// Mandatory.
        #[serde(default)]
        required: bool,
        /// Input flavour.
        #[serde(default)]
        input_type: InputType,
        /// Placeholder.
        #[serde(default)]
        placeholder: Option<String>,
    },
    /// Single choice.
    Selection {
        /// Question text.
        label: String,
        /// Mandatory.
        #[serde(default)]
        required: bool,
        /// Options.
        options: Vec<String>,
    },
    /// Multiple choice.
    MultipleChoice {
        /// Question text.
        label: String,
        /// Mandatory.
        #[serde(default)]
        required: bool,
        /// Options.
        options: Vec<String>,
        /// Allow several options.
        #[serde(default)]
        allow_multiple: bool,
    },
    /// Rating.
    Rating {
        /// Question text.
        label: String,
        /// Mandatory.
        #[serde(default)]
        required: bool,
        /// Top of the scale.
        #[serde(default = "default_max_rating")]
        max_rating: i32,
    },
    /// Matrix.
    Matrix {
        /// Question text.
        label: String,
        /// Every row mandatory.
        #[serde(default)]
        required: bool,
        /// Row labels.
        rows: Vec<String>,
        /// Column labels.
        columns: Vec<String>,
    },
    /// Net Promoter Score.
    NetPromoterScore {
        /// Question text.
        label: String,
        /// Mandatory.
        #[serde(default)]
        required: bool,
        /// Caption under 0.
        #[serde(default)]
        low_label: Option<String>,
        /// Caption under 10.
        #[serde(default)]
        high_label: Option<String>,
    },
    /// Separator.
    Separator {
        /// Section title.
        label: String,
        /// Section description.
        #[serde(default)]
        description: Option<String>,
    },
}

fn default_max_rating() -> i32 {
    5
}

impl FieldDefinition {
    /// Discriminant.
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Input { .. } => FieldKind::Input,
            Self::Selection { .. } => FieldKind::Selection,
            Self::MultipleChoice { .. } => FieldKind::MultipleChoice,
            Self::Rating { .. } => FieldKind::Rating,
            Self::Matrix { .. } => FieldKind::Matrix,
            Self::NetPromoterScore { .. } => FieldKind::NetPromoterScore,
            Self::Separator { .. } => FieldKind::Separator,
        }
    }

    /// Validate and canonicalize the definition (trimmed labels and options).
    pub fn normalized(self) -> Result<Self, AppError> {
        let def = match self {
            Self::Input {
                label,
                required,
                input_type,
                placeholder,
            } => Self::Input {
                label: clean_label(&label)?,
                required,
                input_type,
                placeholder: clean_optional(placeholder),
            },
            Self::Selection {
                label,
                required,
                options,
            } => Self::Selection {
                label: clean_label(&label)?,
                required,
                options: clean_list("options", options)?,
            },
            Self::MultipleChoice {
                label,
                required,
                options,
                allow_multiple,
            } => Self::MultipleChoice {
                label: clean_label(&label)?,
                required,
                options: clean_list("options", options)?,
                allow_multiple,
            },
            Self::Rating {
                label,
                required,
                max_rating,
            } => {
                if !(MIN_RATING_SCALE..=MAX_RATING_SCALE).contains(&max_rating) {
                    return Err(AppError::validation(format!(
                        "max_rating must be between {MIN_RATING_SCALE} and {MAX_RATING_SCALE}"
                    )));
                }
                Self::Rating {
                    label: clean_label(&label)?,
                    required,
                    max_rating,
                }
            }
            Self::Matrix {
                label,
                required,
                rows,
                columns,
            } => Self::Matrix {
                label: clean_label(&label)?,
                required,
                rows: clean_list("rows", rows)?,
                columns: clean_list("columns", columns)?,
            },
            Self::NetPromoterScore {
                label,
                required,
                low_label,
                high_label,
            } => Self::NetPromoterScore {
                label: clean_label(&label)?,
                required,
                low_label: clean_optional(low_label),
                high_label: clean_optional(high_label),
            },
            Self::Separator { label, description } => Self::Separator {
                label: label.trim().to_string(),
                description: clean_optional(description),
            },
        };
        Ok(def)
    }
}

fn clean_label(label: &str) -> Result<String, AppError> {
    let label = label.trim();
    if label.is_empty() {
        return Err(AppError::validation("Field label is required"));
    }
    Ok(label.to_string())
}

fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn clean_list(what: &str, items: Vec<String>) -> Result<Vec<String>, AppError> {
    let mut cleaned: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let item = item.trim().to_string();
        if item.is_empty() {
            return Err(AppError::validation(format!("{what} may not contain blank entries")));
        }
        if cleaned.contains(&item) {
            return Err(AppError::validation(format!("Duplicate entry '{item}' in {what}")));
        }
        cleaned.push(item);
    }
    if cleaned.is_empty() {
        return Err(AppError::validation(format!("At least one entry is required in {what}")));
    }
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_deserializes_by_tag() {
        let def: FieldDefinition = serde_json::from_value(serde_json::json!({
            "type": "multiple_choice",
            "label": "Services",
            "options": ["Tax", "Payroll"],
            "allow_multiple": true
        }))
        .unwrap();
        assert_eq!(def.kind(), FieldKind::MultipleChoice);
    }

    #[test]
    fn test_normalize_trims_and_rejects_duplicates() {
        let def = FieldDefinition::Selection {
            label: "  Entity type ".into(),
            required: true,
            options: vec![" LLC".into(), "S-Corp ".into()],
        }
        .normalized()
        .unwrap();
        assert_eq!(
            def,
            FieldDefinition::Selection {
                label: "Entity type".into(),
                required: true,
                options: vec!["LLC".into(), "S-Corp".into()],
            }
        );

        let dup = FieldDefinition::Selection {
            label: "x".into(),
            required: false,
            options: vec!["A".into(), " A".into()],
        };
        assert!(dup.normalized().is_err());
    }

    #[test]
    fn test_normalize_rejects_empty_lists_and_bad_scale() {
        let matrix = FieldDefinition::Matrix {
            label: "Satisfaction".into(),
            required: false,
            rows: vec!["Speed".into()],
            columns: vec![],
        };
        assert!(matrix.normalized().is_err());

        let rating = FieldDefinition::Rating {
            label: "Rate us".into(),
            required: false,
            max_rating: 11,
        };
        assert!(rating.normalized().is_err());

        let blank = FieldDefinition::Input {
            label: "  ".into(),
            required: false,
            input_type: InputType::Text,
            placeholder: None,
        };
        assert!(blank.normalized().is_err());
    }
}
