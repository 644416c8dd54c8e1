//! Blog post repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use ledgerdesk_core::error::{AppError, ErrorKind};
use ledgerdesk_core::result::AppResult;
use ledgerdesk_core::types::pagination::{PageRequest, PageResponse};
use ledgerdesk_entity::blog::{BlogPost, CreateBlogPost, UpdateBlogPost};

use super::user::escape_like;

const SLUG_UNIQUE: &str = "blog_posts_slug_key";

fn map_write_error(message: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| match e {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(SLUG_UNIQUE) => {
            AppError::conflict("A post with this slug already exists")
        }
        _ => AppError::with_source(ErrorKind::Database, message, e),
    }
}

/// Repository for blog posts.
#[derive(Debug, Clone)]
pub struct BlogRepository {
    pool: PgPool,
}

impl BlogRepository {
    /// Create a new blog repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Published posts, newest publication first.
    pub async fn find_published(&self, page: &PageRequest) -> AppResult<PageResponse<BlogPost>> {
        self.find_page(true, page).await
    }

    /// Every post, newest first (admin).
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<BlogPost>> {
        self.find_page(false, page).await
    }

    async fn find_page(
        &self,
        published_only: bool,
        page: &PageRequest,
    ) -> AppResult<PageResponse<BlogPost>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM blog_posts WHERE (NOT $1 OR is_published)")
                .bind(published_only)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count posts", e))?;

        let posts = sqlx::query_as::<_, BlogPost>(
            "SELECT * FROM blog_posts WHERE (NOT $1 OR is_published) \
             ORDER BY COALESCE(published_at, created_at) DESC LIMIT $2 OFFSET $3",
        )
        .bind(published_only)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list posts", e))?;

        Ok(PageResponse::new(posts, page, total as u64))
    }

    /// Find a post by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<BlogPost>> {
        sqlx::query_as::<_, BlogPost>("SELECT * FROM blog_posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find post", e))
    }

    /// Find a post by slug.
    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<BlogPost>> {
        sqlx::query_as::<_, BlogPost>("SELECT * FROM blog_posts WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find post", e))
    }

    /// Slugs equal to `base` or of the form `base-*`, excluding one post.
    pub async fn slugs_like(&self, base: &str, exclude: Option<Uuid>) -> AppResult<Vec<String>> {
        sqlx::query_scalar(
            "SELECT slug FROM blog_posts \
             WHERE (slug = $1 OR slug LIKE $2) AND ($3::uuid IS NULL OR id <> $3)",
        )
        .bind(base)
        .bind(format!("{}-%", escape_like(base)))
        .bind(exclude)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list slugs", e))
    }

    /// Create a post. Published posts get `published_at` stamped.
    pub async fn create(&self, data: &CreateBlogPost) -> AppResult<BlogPost> {
        sqlx::query_as::<_, BlogPost>(
            "INSERT INTO blog_posts (id, slug, title, excerpt, content, cover_image_url, \
                                     author_id, is_published, published_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, CASE WHEN $8 THEN now() END) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.slug)
        .bind(&data.title)
        .bind(&data.excerpt)
        .bind(&data.content)
        .bind(&data.cover_image_url)
        .bind(data.author_id)
        .bind(data.is_published)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error("Failed to create post"))
    }

    /// Update a post. `published_at` is set the first time it is published.
    pub async fn update(&self, id: Uuid, data: &UpdateBlogPost) -> AppResult<BlogPost> {
        sqlx::query_as::<_, BlogPost>(
            "UPDATE blog_posts SET slug = COALESCE($2, slug), \
                                   title = COALESCE($3, title), \
                                   excerpt = COALESCE($4, excerpt), \
                                   content = COALESCE($5, content), \
                                   cover_image_url = COALESCE($6, cover_image_url), \
                                   is_published = COALESCE($7, is_published), \
                                   published_at = CASE \
                                       WHEN published_at IS NULL AND COALESCE($7, is_published) \
                                       THEN now() ELSE published_at END, \
                                   updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.slug)
        .bind(&data.title)
        .bind(&data.excerpt)
        .bind(&data.content)
        .bind(&data.cover_image_url)
        .bind(data.is_published)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error("Failed to update post"))?
        .ok_or_else(|| AppError::not_found(format!("Post {id} not found")))
    }

    /// Delete a post.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete post", e))?;
        Ok(result.rows_affected() > 0)
    }
}
