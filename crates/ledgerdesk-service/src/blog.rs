//! Blog posts: public reading and admin authoring.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use ledgerdesk_core::error::AppError;
use ledgerdesk_core::types::pagination::{PageRequest, PageResponse};
use ledgerdesk_database::repositories::BlogRepository;
use ledgerdesk_entity::blog::slug::{slugify, unique_slug};
use ledgerdesk_entity::blog::{BlogPost, CreateBlogPost, UpdateBlogPost};

use crate::context::RequestContext;

/// Request to write a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    /// Title.
    pub title: String,
    /// Explicit slug; derived from the title when absent.
    pub slug: Option<String>,
    /// Short summary.
    pub excerpt: Option<String>,
    /// Body.
    pub content: String,
    /// Cover image.
    pub cover_image_url: Option<String>,
    /// Publish immediately.
    #[serde(default)]
    pub is_published: bool,
}

/// Serves and authors blog posts.
#[derive(Debug, Clone)]
pub struct BlogService {
    repo: Arc<BlogRepository>,
}

impl BlogService {
    /// Creates a new blog service.
    pub fn new(repo: Arc<BlogRepository>) -> Self {
        Self { repo }
    }

    /// Published posts, newest first.
    pub async fn list_published(&self, page: PageRequest) -> Result<PageResponse<BlogPost>, AppError> {
        self.repo.find_published(&page).await
    }

    /// A published post by slug. Drafts are not found.
    pub async fn get_published(&self, slug: &str) -> Result<BlogPost, AppError> {
        self.repo
            .find_by_slug(slug)
            .await?
            .filter(|p| p.is_published)
            .ok_or_else(|| AppError::not_found("Post not found"))
    }

    /// Every post including drafts.
    pub async fn list_all(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<BlogPost>, AppError> {
        ctx.require_admin()?;
        self.repo.find_all(&page).await
    }

    /// Any post by id, drafts included. Admin only.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<BlogPost, AppError> {
        ctx.require_admin()?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found"))
    }

    /// Write a post. The slug is made unique with a numeric suffix.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreatePostRequest,
    ) -> Result<BlogPost, AppError> {
        ctx.require_admin()?;
        let title = required(&req.title, "Title")?;
        let content = required(&req.content, "Content")?;
        let slug = self
            .resolve_slug(req.slug.as_deref().unwrap_or(title.as_str()), None)
            .await?;

        let post = self
            .repo
            .create(&CreateBlogPost {
                slug,
                title,
                excerpt: req.excerpt,
                content,
                cover_image_url: req.cover_image_url,
                author_id: Some(ctx.user_id),
                is_published: req.is_published,
            })
            .await?;

        info!(admin_id = %ctx.user_id, post_id = %post.id, slug = %post.slug, "Blog post created");
        Ok(post)
    }

    /// Edit a post. The slug only changes when one is supplied.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        mut data: UpdateBlogPost,
    ) -> Result<BlogPost, AppError> {
        ctx.require_admin()?;
        data.title = data
            .title
            .as_deref()
            .map(|t| required(t, "Title"))
            .transpose()?;
        data.content = data
            .content
            .as_deref()
            .map(|c| required(c, "Content"))
            .transpose()?;
        if let Some(requested) = data.slug.take() {
            data.slug = Some(self.resolve_slug(&requested, Some(id)).await?);
        }

        let post = self.repo.update(id, &data).await?;
        info!(admin_id = %ctx.user_id, post_id = %post.id, "Blog post updated");
        Ok(post)
    }

    /// Remove a post permanently. Admin only; 404 when it does not exist.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        ctx.require_admin()?;
        if !self.repo.delete(id).await? {
            return Err(AppError::not_found("Post not found"));
        }
        info!(admin_id = %ctx.user_id, post_id = %id, "Blog post deleted");
        Ok(())
    }

    async fn resolve_slug(&self, source: &str, exclude: Option<Uuid>) -> Result<String, AppError> {
        let base = slugify(source);
        let taken = self.repo.slugs_like(&base, exclude).await?;
        Ok(unique_slug(&base, &taken))
    }
}

fn required(value: &str, field: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}
