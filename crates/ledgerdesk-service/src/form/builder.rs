//! Admin form builder: forms, fields, ordering, and responses.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use ledgerdesk_core::error::AppError;
use ledgerdesk_database::repositories::{FormRepository, FormResponseRepository};
use ledgerdesk_entity::form::{
    CreateForm, FieldDefinition, Form, FormDetail, FormField, FormSummary, ResponseDetail,
    ResponseWithUser, UpdateForm,
};

use crate::context::RequestContext;

/// Request to create a form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFormRequest {
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Request to edit form metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFormRequest {
    /// New title.
    pub title: Option<String>,
    /// New description; an empty string clears it.
    pub description: Option<String>,
}

/// Builds forms and reviews their responses. Admin only.
#[derive(Debug, Clone)]
pub struct FormBuilderService {
    /// Form repository.
    form_repo: Arc<FormRepository>,
    /// Response repository.
    response_repo: Arc<FormResponseRepository>,
}

impl FormBuilderService {
    /// Creates a new form builder service.
    pub fn new(form_repo: Arc<FormRepository>, response_repo: Arc<FormResponseRepository>) -> Self {
        Self {
            form_repo,
            response_repo,
        }
    }

    /// All forms with their response counts.
    pub async fn list_forms(&self, ctx: &RequestContext) -> Result<Vec<FormSummary>, AppError> {
        ctx.require_admin()?;
        self.form_repo.find_all_with_counts().await
    }

    /// A form with its fields in display order.
    pub async fn get_form(&self, ctx: &RequestContext, form_id: Uuid) -> Result<FormDetail, AppError> {
        ctx.require_admin()?;
        let form = self.find_form(form_id).await?;
        let fields = self.form_repo.fields(form_id).await?;
        Ok(FormDetail::assemble(form, fields))
    }

    /// Create an unpublished, empty form.
    pub async fn create_form(
        &self,
        ctx: &RequestContext,
        req: CreateFormRequest,
    ) -> Result<Form, AppError> {
        ctx.require_admin()?;
        let form = self
            .form_repo
            .create(&CreateForm {
                title: required_title(&req.title)?,
                description: req.description.filter(|d| !d.trim().is_empty()),
                created_by: Some(ctx.user_id),
            })
            .await?;

        info!(admin_id = %ctx.user_id, form_id = %form.id, "Form created");
        Ok(form)
    }

    /// Edit title or description.
    pub async fn update_form(
        &self,
        ctx: &RequestContext,
        form_id: Uuid,
        req: UpdateFormRequest,
    ) -> Result<Form, AppError> {
        ctx.require_admin()?;
        let title = match req.title.as_deref() {
            Some(title) => Some(required_title(title)?),
            None => None,
        };
        let description = req
            .description
            .map(|d| Some(d.trim().to_string()).filter(|d| !d.is_empty()));

        self.form_repo
            .update(form_id, &UpdateForm { title, description })
            .await
    }

    /// Publish or unpublish a form.
    pub async fn set_published(
        &self,
        ctx: &RequestContext,
        form_id: Uuid,
        published: bool,
    ) -> Result<Form, AppError> {
        ctx.require_admin()?;
        let form = self.form_repo.set_published(form_id, published).await?;
        info!(admin_id = %ctx.user_id, form_id = %form.id, published, "Form publish state changed");
        Ok(form)
    }

    /// Delete a form with its fields and responses.
    pub async fn delete_form(&self, ctx: &RequestContext, form_id: Uuid) -> Result<(), AppError> {
        ctx.require_admin()?;
        if !self.form_repo.delete(form_id).await? {
            return Err(AppError::not_found("Form not found"));
        }
        info!(admin_id = %ctx.user_id, form_id = %form_id, "Form deleted");
        Ok(())
    }

    /// Append a field.
    pub async fn add_field(
        &self,
        ctx: &RequestContext,
        form_id: Uuid,
        definition: FieldDefinition,
    ) -> Result<FormField, AppError> {
        ctx.require_admin()?;
        let definition = definition.normalized()?;
        self.form_repo.add_field(form_id, &definition).await
    }

    /// Replace a field's definition. Its type cannot change.
    pub async fn update_field(
        &self,
        ctx: &RequestContext,
        form_id: Uuid,
        field_id: Uuid,
        definition: FieldDefinition,
    ) -> Result<FormField, AppError> {
        ctx.require_admin()?;
        let definition = definition.normalized()?;

        let existing = self
            .form_repo
            .fields(form_id)
            .await?
            .into_iter()
            .find(|f| f.id() == field_id)
            .ok_or_else(|| AppError::not_found("Field not found"))?;
        if existing.kind() != definition.kind() {
            return Err(AppError::validation("A field's type cannot be changed"));
        }

        self.form_repo
            .update_field(form_id, field_id, &definition)
            .await
    }

    /// Remove a field.
    pub async fn delete_field(
        &self,
        ctx: &RequestContext,
        form_id: Uuid,
        field_id: Uuid,
    ) -> Result<(), AppError> {
        ctx.require_admin()?;
        if !self.form_repo.delete_field(form_id, field_id).await? {
            return Err(AppError::not_found("Field not found"));
        }
        Ok(())
    }

    /// Set the display order. Must be a permutation of the current fields.
    pub async fn reorder_fields(
        &self,
        ctx: &RequestContext,
        form_id: Uuid,
        field_ids: &[Uuid],
    ) -> Result<FormDetail, AppError> {
        ctx.require_admin()?;
        let form = self.form_repo.reorder_fields(form_id, field_ids).await?;
        let fields = self.form_repo.fields(form_id).await?;
        Ok(FormDetail::assemble(form, fields))
    }

    /// Responses to a form with respondent details.
    pub async fn responses(
        &self,
        ctx: &RequestContext,
        form_id: Uuid,
    ) -> Result<Vec<ResponseWithUser>, AppError> {
        ctx.require_admin()?;
        self.find_form(form_id).await?;
        self.response_repo.find_by_form(form_id).await
    }

    /// A single response with its answers.
    pub async fn get_response(
        &self,
        ctx: &RequestContext,
        response_id: Uuid,
    ) -> Result<ResponseDetail, AppError> {
        ctx.require_admin()?;
        let response = self
            .response_repo
            .find_by_id(response_id)
            .await?
            .ok_or_else(|| AppError::not_found("Response not found"))?;
        let answers = self.response_repo.answers(response.id).await?;
        Ok(ResponseDetail { response, answers })
    }

    /// Delete a response, letting the user submit again.
    pub async fn delete_response(
        &self,
        ctx: &RequestContext,
        response_id: Uuid,
    ) -> Result<(), AppError> {
        ctx.require_admin()?;
        if !self.response_repo.delete(response_id).await? {
            return Err(AppError::not_found("Response not found"));
        }
        info!(admin_id = %ctx.user_id, response_id = %response_id, "Form response deleted");
        Ok(())
    }

    async fn find_form(&self, form_id: Uuid) -> Result<Form, AppError> {
        self.form_repo
            .find_by_id(form_id)
            .await?
            .ok_or_else(|| AppError::not_found("Form not found"))
    }
}

fn required_title(title: &str) -> Result<String, AppError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::validation("Form title is required"));
    }
    Ok(title.to_string())
}
