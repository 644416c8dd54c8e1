//! Form and form field repository implementation.
//!
//! Fields are spread over one table per kind. `forms.field_order` holds
//! the display order and is rewritten in the same transaction as any
//! field insert or delete.

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use ledgerdesk_core::error::{AppError, ErrorKind};
use ledgerdesk_core::result::AppResult;
use ledgerdesk_entity::form::validate::check_reorder;
use ledgerdesk_entity::form::{
    CreateForm, FieldDefinition, FieldKind, Form, FormField, FormSummary, InputField,
    MatrixField, MultipleChoiceField, NetPromoterScoreField, RatingField, SelectionField,
    SeparatorField, UpdateForm,
};

const FIELD_KINDS: [FieldKind; 7] = [
    FieldKind::Input,
    FieldKind::Selection,
    FieldKind::MultipleChoice,
    FieldKind::Rating,
    FieldKind::Matrix,
    FieldKind::NetPromoterScore,
    FieldKind::Separator,
];

fn db_error(message: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, message, e)
}

/// Repository for forms and their fields.
#[derive(Debug, Clone)]
pub struct FormRepository {
    pool: PgPool,
}

impl FormRepository {
    /// Create a new form repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a form by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Form>> {
        sqlx::query_as::<_, Form>("SELECT * FROM forms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find form"))
    }

    /// All forms with their response counts, newest first.
    pub async fn find_all_with_counts(&self) -> AppResult<Vec<FormSummary>> {
        sqlx::query_as::<_, FormSummary>(
            "SELECT f.*, \
                    (SELECT COUNT(*) FROM form_responses r WHERE r.form_id = f.id) AS response_count \
             FROM forms f ORDER BY f.created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list forms"))
    }

    /// Published forms, newest first.
    pub async fn find_published(&self) -> AppResult<Vec<Form>> {
        sqlx::query_as::<_, Form>(
            "SELECT * FROM forms WHERE is_published ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list published forms"))
    }

    /// Create an empty, unpublished form.
    pub async fn create(&self, data: &CreateForm) -> AppResult<Form> {
        sqlx::query_as::<_, Form>(
            "INSERT INTO forms (id, title, description, created_by) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create form"))
    }

    /// Update title and description.
    pub async fn update(&self, id: Uuid, data: &UpdateForm) -> AppResult<Form> {
        let (set_description, description) = match &data.description {
            Some(description) => (true, description.clone()),
            None => (false, None),
        };

        sqlx::query_as::<_, Form>(
            "UPDATE forms SET title = COALESCE($2, title), \
                              description = CASE WHEN $3 THEN $4 ELSE description END, \
                              updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(set_description)
        .bind(description)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update form"))?
        .ok_or_else(|| AppError::not_found(format!("Form {id} not found")))
    }

    /// Publish or unpublish a form.
    pub async fn set_published(&self, id: Uuid, published: bool) -> AppResult<Form> {
        sqlx::query_as::<_, Form>(
            "UPDATE forms SET is_published = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(published)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to publish form"))?
        .ok_or_else(|| AppError::not_found(format!("Form {id} not found")))
    }

    /// Delete a form with its fields and responses.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM forms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete form"))?;
        Ok(result.rows_affected() > 0)
    }

    /// Every field of a form, unordered.
    pub async fn fields(&self, form_id: Uuid) -> AppResult<Vec<FormField>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(db_error("Failed to acquire connection"))?;
        load_fields(&mut conn, form_id).await
    }

    /// Append a field to a form.
    pub async fn add_field(&self, form_id: Uuid, definition: &FieldDefinition) -> AppResult<FormField> {
        let mut tx = self.pool.begin().await.map_err(db_error("Failed to begin transaction"))?;

        lock_form(&mut tx, form_id).await?;
        let field = insert_field(&mut tx, form_id, Uuid::new_v4(), definition).await?;

        sqlx::query(
            "UPDATE forms SET field_order = array_append(field_order, $2), updated_at = now() \
             WHERE id = $1",
        )
        .bind(form_id)
        .bind(field.id())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to update field order"))?;

        tx.commit().await.map_err(db_error("Failed to commit field insert"))?;
        Ok(field)
    }

    /// Replace a field's definition. The kind must match the stored row.
    pub async fn update_field(
        &self,
        form_id: Uuid,
        field_id: Uuid,
        definition: &FieldDefinition,
    ) -> AppResult<FormField> {
        let mut tx = self.pool.begin().await.map_err(db_error("Failed to begin transaction"))?;

        lock_form(&mut tx, form_id).await?;
        let field = update_field_row(&mut tx, form_id, field_id, definition)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Field {field_id} not found")))?;

        touch_form(&mut tx, form_id).await?;
        tx.commit().await.map_err(db_error("Failed to commit field update"))?;
        Ok(field)
    }

    /// Remove a field and drop it from the display order.
    pub async fn delete_field(&self, form_id: Uuid, field_id: Uuid) -> AppResult<bool> {
        let mut tx = self.pool.begin().await.map_err(db_error("Failed to begin transaction"))?;

        lock_form(&mut tx, form_id).await?;
        let mut deleted = 0;
        for kind in FIELD_KINDS {
            let result = sqlx::query(&format!(
                "DELETE FROM {} WHERE id = $1 AND form_id = $2",
                kind.table()
            ))
            .bind(field_id)
            .bind(form_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to delete field"))?;
            deleted += result.rows_affected();
        }

        if deleted == 0 {
            return Ok(false);
        }

        sqlx::query(
            "UPDATE forms SET field_order = array_remove(field_order, $2), updated_at = now() \
             WHERE id = $1",
        )
        .bind(form_id)
        .bind(field_id)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to update field order"))?;

        tx.commit().await.map_err(db_error("Failed to commit field delete"))?;
        Ok(true)
    }

    /// Set the display order. `field_ids` must list every field exactly once.
    pub async fn reorder_fields(&self, form_id: Uuid, field_ids: &[Uuid]) -> AppResult<Form> {
        let mut tx = self.pool.begin().await.map_err(db_error("Failed to begin transaction"))?;

        lock_form(&mut tx, form_id).await?;
        let current: Vec<Uuid> = load_fields(&mut tx, form_id)
            .await?
            .iter()
            .map(FormField::id)
            .collect();
        check_reorder(&current, field_ids)?;

        let form = sqlx::query_as::<_, Form>(
            "UPDATE forms SET field_order = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(form_id)
        .bind(field_ids)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("Failed to reorder fields"))?;

        tx.commit().await.map_err(db_error("Failed to commit reorder"))?;
        Ok(form)
    }
}

async fn lock_form(conn: &mut PgConnection, form_id: Uuid) -> AppResult<()> {
    let found: Option<Uuid> = sqlx::query_scalar("SELECT id FROM forms WHERE id = $1 FOR UPDATE")
        .bind(form_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(db_error("Failed to lock form"))?;
    found
        .map(|_| ())
        .ok_or_else(|| AppError::not_found(format!("Form {form_id} not found")))
}

async fn touch_form(conn: &mut PgConnection, form_id: Uuid) -> AppResult<()> {
    sqlx::query("UPDATE forms SET updated_at = now() WHERE id = $1")
        .bind(form_id)
        .execute(&mut *conn)
        .await
        .map_err(db_error("Failed to touch form"))?;
    Ok(())
}

async fn load_kind<T>(conn: &mut PgConnection, kind: FieldKind, form_id: Uuid) -> AppResult<Vec<T>>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    sqlx::query_as::<_, T>(&format!(
        "SELECT * FROM {} WHERE form_id = $1 ORDER BY created_at",
        kind.table()
    ))
    .bind(form_id)
    .fetch_all(&mut *conn)
    .await
    .map_err(db_error("Failed to load form fields"))
}

async fn load_fields(conn: &mut PgConnection, form_id: Uuid) -> AppResult<Vec<FormField>> {
    let mut fields = Vec::new();
    fields.extend(
        load_kind::<InputField>(conn, FieldKind::Input, form_id)
            .await?
            .into_iter()
            .map(FormField::Input),
    );
    fields.extend(
        load_kind::<SelectionField>(conn, FieldKind::Selection, form_id)
            .await?
            .into_iter()
            .map(FormField::Selection),
    );
    fields.extend(
        load_kind::<MultipleChoiceField>(conn, FieldKind::MultipleChoice, form_id)
            .await?
            .into_iter()
            .map(FormField::MultipleChoice),
    );
    fields.extend(
        load_kind::<RatingField>(conn, FieldKind::Rating, form_id)
            .await?
            .into_iter()
            .map(FormField::Rating),
    );
    fields.extend(
        load_kind::<MatrixField>(conn, FieldKind::Matrix, form_id)
            .await?
            .into_iter()
            .map(FormField::Matrix),
    );
    fields.extend(
        load_kind::<NetPromoterScoreField>(conn, FieldKind::NetPromoterScore, form_id)
            .await?
            .into_iter()
            .map(FormField::NetPromoterScore),
    );
    fields.extend(
        load_kind::<SeparatorField>(conn, FieldKind::Separator, form_id)
            .await?
            .into_iter()
            .map(FormField::Separator),
    );
    Ok(fields)
}

async fn insert_field(
    conn: &mut PgConnection,
    form_id: Uuid,
    id: Uuid,
    definition: &FieldDefinition,
) -> AppResult<FormField> {
    let err = db_error("Failed to insert field");
    let field = match definition {
        FieldDefinition::Input {
            label,
            required,
            input_type,
            placeholder,
        } => FormField::Input(
            sqlx::query_as(
                "INSERT INTO form_inputs (id, form_id, label, required, input_type, placeholder) \
                 VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
            )
            .bind(id)
            .bind(form_id)
            .bind(label)
            .bind(required)
            .bind(input_type)
            .bind(placeholder)
            .fetch_one(&mut *conn)
            .await
            .map_err(err)?,
        ),
        FieldDefinition::Selection {
            label,
            required,
            options,
        } => FormField::Selection(
            sqlx::query_as(
                "INSERT INTO form_selections (id, form_id, label, required, options) \
                 VALUES ($1, $2, $3, $4, $5) RETURNING *",
            )
            .bind(id)
            .bind(form_id)
            .bind(label)
            .bind(required)
            .bind(options)
            .fetch_one(&mut *conn)
            .await
            .map_err(err)?,
        ),
        FieldDefinition::MultipleChoice {
            label,
            required,
            options,
            allow_multiple,
        } => FormField::MultipleChoice(
            sqlx::query_as(
                "INSERT INTO form_multiple_choices \
                     (id, form_id, label, required, options, allow_multiple) \
                 VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
            )
            .bind(id)
            .bind(form_id)
            .bind(label)
            .bind(required)
            .bind(options)
            .bind(allow_multiple)
            .fetch_one(&mut *conn)
            .await
            .map_err(err)?,
        ),
        FieldDefinition::Rating {
            label,
            required,
            max_rating,
        } => FormField::Rating(
            sqlx::query_as(
                "INSERT INTO form_ratings (id, form_id, label, required, max_rating) \
                 VALUES ($1, $2, $3, $4, $5) RETURNING *",
            )
            .bind(id)
            .bind(form_id)
            .bind(label)
            .bind(required)
            .bind(max_rating)
            .fetch_one(&mut *conn)
            .await
            .map_err(err)?,
        ),
        FieldDefinition::Matrix {
            label,
            required,
            rows,
            columns,
        } => FormField::Matrix(
            sqlx::query_as(
                "INSERT INTO form_matrices (id, form_id, label, required, rows, columns) \
                 VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
            )
            .bind(id)
            .bind(form_id)
            .bind(label)
            .bind(required)
            .bind(rows)
            .bind(columns)
            .fetch_one(&mut *conn)
            .await
            .map_err(err)?,
        ),
        FieldDefinition::NetPromoterScore {
            label,
            required,
            low_label,
            high_label,
        } => FormField::NetPromoterScore(
            sqlx::query_as(
                "INSERT INTO form_net_promoter_scores \
                     (id, form_id, label, required, low_label, high_label) \
                 VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
            )
            .bind(id)
            .bind(form_id)
            .bind(label)
            .bind(required)
            .bind(low_label)
            .bind(high_label)
            .fetch_one(&mut *conn)
            .await
            .map_err(err)?,
        ),
        FieldDefinition::Separator { label, description } => FormField::Separator(
            sqlx::query_as(
                "INSERT INTO form_separators (id, form_id, label, description) \
                 VALUES ($1, $2, $3, $4) RETURNING *",
            )
            .bind(id)
            .bind(form_id)
            .bind(label)
            .bind(description)
            .fetch_one(&mut *conn)
            .await
            .map_err(err)?,
        ),
    };
    Ok(field)
}

async fn update_field_row(
    conn: &mut PgConnection,
    form_id: Uuid,
    id: Uuid,
    definition: &FieldDefinition,
) -> AppResult<Option<FormField>> {
    let err = db_error("Failed to update field");
    let field = match definition {
        FieldDefinition::Input {
            label,
            required,
            input_type,
            placeholder,
        } => sqlx::query_as(
            "UPDATE form_inputs SET label = $3, required = $4, input_type = $5, placeholder = $6 \
             WHERE id = $1 AND form_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(form_id)
        .bind(label)
        .bind(required)
        .bind(input_type)
        .bind(placeholder)
        .fetch_optional(&mut *conn)
        .await
        .map_err(err)?
        .map(FormField::Input),
        FieldDefinition::Selection {
            label,
            required,
            options,
        } => sqlx::query_as(
            "UPDATE form_selections SET label = $3, required = $4, options = $5 \
             WHERE id = $1 AND form_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(form_id)
        .bind(label)
        .bind(required)
        .bind(options)
        .fetch_optional(&mut *conn)
        .await
        .map_err(err)?
        .map(FormField::Selection),
        FieldDefinition::MultipleChoice {
            label,
            required,
            options,
            allow_multiple,
        } => sqlx::query_as(
            "UPDATE form_multiple_choices \
             SET label = $3, required = $4, options = $5, allow_multiple = $6 \
             WHERE id = $1 AND form_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(form_id)
        .bind(label)
        .bind(required)
        .bind(options)
        .bind(allow_multiple)
        .fetch_optional(&mut *conn)
        .await
        .map_err(err)?
        .map(FormField::MultipleChoice),
        FieldDefinition::Rating {
            label,
            required,
            max_rating,
        } => sqlx::query_as(
            "UPDATE form_ratings SET label = $3, required = $4, max_rating = $5 \
             WHERE id = $1 AND form_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(form_id)
        .bind(label)
        .bind(required)
        .bind(max_rating)
        .fetch_optional(&mut *conn)
        .await
        .map_err(err)?
        .map(FormField::Rating),
        FieldDefinition::Matrix {
            label,
            required,
            rows,
            columns,
        } => sqlx::query_as(
            "UPDATE form_matrices SET label = $3, required = $4, rows = $5, columns = $6 \
             WHERE id = $1 AND form_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(form_id)
        .bind(label)
        .bind(required)
        .bind(rows)
        .bind(columns)
        .fetch_optional(&mut *conn)
        .await
        .map_err(err)?
        .map(FormField::Matrix),
        FieldDefinition::NetPromoterScore {
            label,
            required,
            low_label,
            high_label,
        } => sqlx::query_as(
            "UPDATE form_net_promoter_scores \
             SET label = $3, required = $4, low_label = $5, high_label = $6 \
             WHERE id = $1 AND form_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(form_id)
        .bind(label)
        .bind(required)
        .bind(low_label)
        .bind(high_label)
        .fetch_optional(&mut *conn)
        .await
        .map_err(err)?
        .map(FormField::NetPromoterScore),
        FieldDefinition::Separator { label, description } => sqlx::query_as(
            "UPDATE form_separators SET label = $3, description = $4 \
             WHERE id = $1 AND form_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(form_id)
        .bind(label)
        .bind(description)
        .fetch_optional(&mut *conn)
        .await
        .map_err(err)?
        .map(FormField::Separator),
    };
    Ok(field)
}
