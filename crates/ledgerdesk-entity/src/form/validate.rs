//! Answer validation and field reordering rules.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde_json::Value;
use uuid::Uuid;

use ledgerdesk_core::error::AppError;

use super::field::{
    FormField, InputField, InputType, MatrixField, MultipleChoiceField, NPS_MAX, RatingField,
    SelectionField,
};

/// Minimum number of digits in a phone answer.
const MIN_PHONE_DIGITS: usize = 7;

/// Validate a submission against the form's fields.
///
/// Returns the normalized `(field_id, value)` pairs to store, in field
/// order. Optional fields left blank produce no pair.
pub fn validate_answers(
    fields: &[FormField],
    answers: &HashMap<Uuid, Value>,
) -> Result<Vec<(Uuid, Value)>, AppError> {
    let known: HashSet<Uuid> = fields.iter().map(FormField::id).collect();
    if let Some(unknown) = answers.keys().find(|id| !known.contains(id)) {
        return Err(AppError::validation(format!(
            "Unknown field '{unknown}' in answers"
        )));
    }

    let mut accepted = Vec::new();
    for field in fields {
        let raw = answers.get(&field.id()).unwrap_or(&Value::Null);
        match check_field(field, raw)? {
            Some(value) => accepted.push((field.id(), value)),
            None if field.required() => {
                return Err(AppError::validation(format!(
                    "'{}' is required",
                    field.label()
                )));
            }
            None => {}
        }
    }
    Ok(accepted)
}

/// Check that `proposed` is a permutation of `current`.
pub fn check_reorder(current: &[Uuid], proposed: &[Uuid]) -> Result<(), AppError> {
    let current_set: HashSet<&Uuid> = current.iter().collect();
    let proposed_set: HashSet<&Uuid> = proposed.iter().collect();

    if proposed_set.len() != proposed.len() {
        return Err(AppError::validation("Field order contains duplicates"));
    }
    if current.len() != proposed.len() || current_set != proposed_set {
        return Err(AppError::validation(
            "Field order must list every field of the form exactly once",
        ));
    }
    Ok(())
}

/// Whether a raw value counts as "not answered".
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn invalid(field: &FormField, reason: &str) -> AppError {
    AppError::validation(format!("Invalid answer for '{}': {reason}", field.label()))
}

/// Validate one answer. `Ok(None)` means blank.
fn check_field(field: &FormField, raw: &Value) -> Result<Option<Value>, AppError> {
    let checked = match field {
        FormField::Separator(_) if is_blank(raw) => Ok(None),
        FormField::Separator(_) => Err("this field does not take an answer"),
        _ if is_blank(raw) => Ok(None),
        FormField::Input(f) => check_input(f, raw),
        FormField::Selection(f) => check_selection(f, raw),
        FormField::MultipleChoice(f) => check_multiple_choice(f, raw),
        FormField::Rating(f) => check_rating(f, raw),
        FormField::Matrix(f) => check_matrix(f, raw),
        FormField::NetPromoterScore(_) => check_nps(raw),
    };
    checked.map_err(|reason| invalid(field, reason))
}

fn check_input(field: &InputField, raw: &Value) -> Result<Option<Value>, &'static str> {
    if field.input_type == InputType::Number {
        if let Value::Number(n) = raw {
            return Ok(Some(Value::Number(n.clone())));
        }
    }

    let text = raw.as_str().ok_or("expected text")?.trim();
    match field.input_type {
        InputType::Text | InputType::Textarea => {}
        InputType::Email => {
            if !looks_like_email(text) {
                return Err("expected an email address");
            }
        }
        InputType::Number => {
            if text.parse::<f64>().map(|n| !n.is_finite()).unwrap_or(true) {
                return Err("expected a number");
            }
        }
        InputType::Phone => {
            let allowed = text
                .chars()
                .all(|c| c.is_ascii_digit() || " +-().".contains(c));
            let digits = text.chars().filter(char::is_ascii_digit).count();
            if !allowed || digits < MIN_PHONE_DIGITS {
                return Err("expected a phone number");
            }
        }
        InputType::Date => {
            let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .map_err(|_| "expected a date in YYYY-MM-DD format")?;
            return Ok(Some(Value::String(date.format("%Y-%m-%d").to_string())));
        }
    }
    Ok(Some(Value::String(text.to_string())))
}

fn looks_like_email(text: &str) -> bool {
    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !text.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .map(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
            .unwrap_or(false)
}

fn check_selection(field: &SelectionField, raw: &Value) -> Result<Option<Value>, &'static str> {
    let choice = raw.as_str().ok_or("expected one option")?.trim();
    if !field.options.iter().any(|o| o == choice) {
        return Err("not one of the options");
    }
    Ok(Some(Value::String(choice.to_string())))
}

fn check_multiple_choice(
    field: &MultipleChoiceField,
    raw: &Value,
) -> Result<Option<Value>, &'static str> {
    if !field.allow_multiple {
        let choice = raw.as_str().ok_or("expected a single option")?.trim();
        if !field.options.iter().any(|o| o == choice) {
            return Err("not one of the options");
        }
        return Ok(Some(Value::String(choice.to_string())));
    }

    let items = raw.as_array().ok_or("expected a list of options")?;
    let mut picked: Vec<Value> = Vec::with_capacity(items.len());
    for item in items {
        let choice = item.as_str().ok_or("expected a list of options")?.trim();
        if !field.options.iter().any(|o| o == choice) {
            return Err("not one of the options");
        }
        let choice = Value::String(choice.to_string());
        if picked.contains(&choice) {
            return Err("option picked twice");
        }
        picked.push(choice);
    }
    Ok(Some(Value::Array(picked)))
}

fn integer(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn check_rating(field: &RatingField, raw: &Value) -> Result<Option<Value>, &'static str> {
    let rating = integer(raw).ok_or("expected a whole number")?;
    if !(1..=i64::from(field.max_rating)).contains(&rating) {
        return Err("rating out of range");
    }
    Ok(Some(Value::from(rating)))
}

fn check_nps(raw: &Value) -> Result<Option<Value>, &'static str> {
    let score = integer(raw).ok_or("expected a whole number")?;
    if !(0..=NPS_MAX).contains(&score) {
        return Err("score must be between 0 and 10");
    }
    Ok(Some(Value::from(score)))
}

fn check_matrix(field: &MatrixField, raw: &Value) -> Result<Option<Value>, &'static str> {
    let map = raw.as_object().ok_or("expected an answer per row")?;
    let mut cleaned = serde_json::Map::new();

    for (row, column) in map {
        if !field.rows.contains(row) {
            return Err("unknown row");
        }
        let column = match column {
            Value::Null => continue,
            Value::String(c) if c.trim().is_empty() => continue,
            Value::String(c) => c.as_str(),
            _ => return Err("expected a column for each row"),
        };
        if !field.columns.iter().any(|c| c == column) {
            return Err("unknown column");
        }
        cleaned.insert(row.clone(), Value::String(column.to_string()));
    }

    if cleaned.is_empty() {
        return Ok(None);
    }
    if field.required && cleaned.len() != field.rows.len() {
        return Err("every row must be answered");
    }
    Ok(Some(Value::Object(cleaned)))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::*;
    use crate::form::field::{NetPromoterScoreField, SeparatorField};

    fn input(required: bool, input_type: InputType) -> FormField {
        FormField::Input(InputField {
            id: Uuid::new_v4(),
            form_id: Uuid::nil(),
            label: "Answer".into(),
            required,
            input_type,
            placeholder: None,
            created_at: Utc::now(),
        })
    }

    fn answers(pairs: &[(&FormField, Value)]) -> HashMap<Uuid, Value> {
        pairs.iter().map(|(f, v)| (f.id(), v.clone())).collect()
    }

    #[test]
    fn test_required_field_missing() {
        let field = input(true, InputType::Text);
        let err = validate_answers(&[field.clone()], &HashMap::new()).unwrap_err();
        assert!(err.message.contains("'Answer' is required"));

        let err = validate_answers(&[field.clone()], &answers(&[(&field, json!("   "))]))
            .unwrap_err();
        assert!(err.message.contains("required"));
    }

    #[test]
    fn test_optional_blank_is_skipped() {
        let field = input(false, InputType::Email);
        let stored = validate_answers(&[field.clone()], &answers(&[(&field, json!(""))])).unwrap();
        assert!(stored.is_empty());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let field = input(false, InputType::Text);
        let mut map = HashMap::new();
        map.insert(Uuid::new_v4(), json!("x"));
        assert!(validate_answers(&[field], &map).is_err());
    }

    #[test]
    fn test_input_types() {
        let email = input(true, InputType::Email);
        assert!(validate_answers(&[email.clone()], &answers(&[(&email, json!("a@b.co"))])).is_ok());
        assert!(validate_answers(&[email.clone()], &answers(&[(&email, json!("a@b"))])).is_err());

        let number = input(true, InputType::Number);
        assert!(validate_answers(&[number.clone()], &answers(&[(&number, json!(42.5))])).is_ok());
        assert!(validate_answers(&[number.clone()], &answers(&[(&number, json!("12"))])).is_ok());
        assert!(validate_answers(&[number.clone()], &answers(&[(&number, json!("abc"))])).is_err());

        let date = input(true, InputType::Date);
        assert!(validate_answers(&[date.clone()], &answers(&[(&date, json!("2024-04-15"))])).is_ok());
        assert!(validate_answers(&[date.clone()], &answers(&[(&date, json!("04/15/2024"))])).is_err());
        let stored =
            validate_answers(&[date.clone()], &answers(&[(&date, json!(" 2024-1-5 "))])).unwrap();
        assert_eq!(stored[0].1, json!("2024-01-05"));

        let phone = input(true, InputType::Phone);
        assert!(
            validate_answers(&[phone.clone()], &answers(&[(&phone, json!("+1 (555) 123-4567"))]))
                .is_ok()
        );
        assert!(validate_answers(&[phone.clone()], &answers(&[(&phone, json!("call me"))])).is_err());
    }

    #[test]
    fn test_choices() {
        let single = FormField::MultipleChoice(MultipleChoiceField {
            id: Uuid::new_v4(),
            form_id: Uuid::nil(),
            label: "Plan".into(),
            required: true,
            options: vec!["Basic".into(), "Pro".into()],
            allow_multiple: false,
            created_at: Utc::now(),
        });
        assert!(validate_answers(&[single.clone()], &answers(&[(&single, json!("Pro"))])).is_ok());
        let stored =
            validate_answers(&[single.clone()], &answers(&[(&single, json!(" Pro "))])).unwrap();
        assert_eq!(stored[0].1, json!("Pro"));
        assert!(
            validate_answers(&[single.clone()], &answers(&[(&single, json!(["Pro"]))])).is_err()
        );

        let multi = match single {
            FormField::MultipleChoice(mut f) => {
                f.allow_multiple = true;
                FormField::MultipleChoice(f)
            }
            _ => unreachable!(),
        };
        let stored =
            validate_answers(&[multi.clone()], &answers(&[(&multi, json!(["Basic", "Pro"]))]))
                .unwrap();
        assert_eq!(stored[0].1, json!(["Basic", "Pro"]));
        assert!(
            validate_answers(&[multi.clone()], &answers(&[(&multi, json!(["Pro", " Pro"]))]))
                .is_err()
        );
        assert!(
            validate_answers(&[multi.clone()], &answers(&[(&multi, json!(["Gold"]))])).is_err()
        );
    }

    #[test]
    fn test_rating_and_nps_ranges() {
        let rating = FormField::Rating(RatingField {
            id: Uuid::new_v4(),
            form_id: Uuid::nil(),
            label: "Stars".into(),
            required: true,
            max_rating: 5,
            created_at: Utc::now(),
        });
        assert!(validate_answers(&[rating.clone()], &answers(&[(&rating, json!(5))])).is_ok());
        assert!(validate_answers(&[rating.clone()], &answers(&[(&rating, json!(0))])).is_err());
        assert!(validate_answers(&[rating.clone()], &answers(&[(&rating, json!(6))])).is_err());
        assert!(validate_answers(&[rating.clone()], &answers(&[(&rating, json!(2.5))])).is_err());

        let nps = FormField::NetPromoterScore(NetPromoterScoreField {
            id: Uuid::new_v4(),
            form_id: Uuid::nil(),
            label: "Recommend".into(),
            required: true,
            low_label: None,
            high_label: None,
            created_at: Utc::now(),
        });
        assert!(validate_answers(&[nps.clone()], &answers(&[(&nps, json!(0))])).is_ok());
        assert!(validate_answers(&[nps.clone()], &answers(&[(&nps, json!(10))])).is_ok());
        assert!(validate_answers(&[nps.clone()], &answers(&[(&nps, json!(11))])).is_err());
    }

    #[test]
    fn test_matrix() {
        let matrix = FormField::Matrix(MatrixField {
            id: Uuid::new_v4(),
            form_id: Uuid::nil(),
            label: "Service".into(),
            required: true,
            rows: vec!["Speed".into(), "Accuracy".into()],
            columns: vec!["Poor".into(), "Good".into()],
            created_at: Utc::now(),
        });
        let full = json!({"Speed": "Good", "Accuracy": "Poor"});
        assert!(validate_answers(&[matrix.clone()], &answers(&[(&matrix, full)])).is_ok());

        let partial = json!({"Speed": "Good"});
        assert!(validate_answers(&[matrix.clone()], &answers(&[(&matrix, partial)])).is_err());

        let bad_column = json!({"Speed": "Great", "Accuracy": "Poor"});
        assert!(validate_answers(&[matrix.clone()], &answers(&[(&matrix, bad_column)])).is_err());
    }

    #[test]
    fn test_separator_rejects_answers() {
        let sep = FormField::Separator(SeparatorField {
            id: Uuid::new_v4(),
            form_id: Uuid::nil(),
            label: "Section".into(),
            description: None,
            created_at: Utc::now(),
        });
        assert!(validate_answers(&[sep.clone()], &HashMap::new()).is_ok());
        assert!(validate_answers(&[sep.clone()], &answers(&[(&sep, json!("hi"))])).is_err());
    }

    #[test]
    fn test_check_reorder() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        assert!(check_reorder(&[a, b, c], &[c, a, b]).is_ok());
        assert!(check_reorder(&[a, b, c], &[a, b]).is_err());
        assert!(check_reorder(&[a, b], &[a, a]).is_err());
        assert!(check_reorder(&[a, b], &[a, c]).is_err());
        assert!(check_reorder(&[], &[]).is_ok());
    }
}
