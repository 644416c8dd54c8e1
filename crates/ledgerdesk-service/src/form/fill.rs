//! Client form filling.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use ledgerdesk_core::error::AppError;
use ledgerdesk_database::repositories::{FormRepository, FormResponseRepository};
use ledgerdesk_entity::form::validate::validate_answers;
use ledgerdesk_entity::form::{ClientFormSummary, Form, FormDetail, ResponseDetail};

use crate::context::RequestContext;

/// Lists published forms and accepts one response per user per form.
#[derive(Debug, Clone)]
pub struct FormFillService {
    /// Form repository.
    form_repo: Arc<FormRepository>,
    /// Response repository.
    response_repo: Arc<FormResponseRepository>,
}

impl FormFillService {
    /// Creates a new form fill service.
    pub fn new(form_repo: Arc<FormRepository>, response_repo: Arc<FormResponseRepository>) -> Self {
        Self {
            form_repo,
            response_repo,
        }
    }

    /// Published forms, flagged with whether the caller already responded.
    pub async fn list_published(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<ClientFormSummary>, AppError> {
        let forms = self.form_repo.find_published().await?;
        let submitted: HashSet<Uuid> = self
            .response_repo
            .form_ids_for_user(ctx.user_id)
            .await?
            .into_iter()
            .collect();

        Ok(forms
            .into_iter()
            .map(|form| ClientFormSummary {
                submitted: submitted.contains(&form.id),
                form,
            })
            .collect())
    }

    /// A published form with its fields in display order.
    pub async fn get_published(&self, form_id: Uuid) -> Result<FormDetail, AppError> {
        let form = self.published_form(form_id).await?;
        let fields = self.form_repo.fields(form_id).await?;
        Ok(FormDetail::assemble(form, fields))
    }

    /// Validate and store the caller's response.
    pub async fn submit(
        &self,
        ctx: &RequestContext,
        form_id: Uuid,
        answers: HashMap<Uuid, Value>,
    ) -> Result<ResponseDetail, AppError> {
        self.published_form(form_id).await?;

        if self
            .response_repo
            .find_by_form_and_user(form_id, ctx.user_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("You have already responded to this form"));
        }

        let fields = self.form_repo.fields(form_id).await?;
        let accepted = validate_answers(&fields, &answers)?;

        let detail = self
            .response_repo
            .submit(form_id, ctx.user_id, &accepted)
            .await?;

        info!(
            user_id = %ctx.user_id,
            form_id = %form_id,
            response_id = %detail.response.id,
            answers = detail.answers.len(),
            "Form response submitted"
        );
        Ok(detail)
    }

    /// The caller's own response to a form.
    pub async fn my_response(
        &self,
        ctx: &RequestContext,
        form_id: Uuid,
    ) -> Result<ResponseDetail, AppError> {
        let response = self
            .response_repo
            .find_by_form_and_user(form_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("You have not responded to this form"))?;
        let answers = self.response_repo.answers(response.id).await?;
        Ok(ResponseDetail { response, answers })
    }

    async fn published_form(&self, form_id: Uuid) -> Result<Form, AppError> {
        self.form_repo
            .find_by_id(form_id)
            .await?
            .filter(|f| f.is_published)
            .ok_or_else(|| AppError::not_found("Form not found"))
    }
}
