use crate::domain::{models::program::Program, ports::ProgramRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresProgramRepo {
    pool: PgPool,
}

impl PostgresProgramRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProgramRepository for PostgresProgramRepo {
    async fn create(&self, program: &Program) -> Result<Program, AppError> {
        sqlx::query_as::<_, Program>(
            r#"INSERT INTO programs (
                id, name, parent_id, slug, image_url, sub_text, colour,
                details_external, external_link, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *"#,
        )
            .bind(&program.id)
            .bind(&program.name)
            .bind(&program.parent_id)
            .bind(&program.slug)
            .bind(&program.image_url)
            .bind(&program.sub_text)
            .bind(&program.colour)
            .bind(program.details_external)
            .bind(&program.external_link)
            .bind(program.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Program>, AppError> {
        sqlx::query_as::<_, Program>("SELECT * FROM programs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Program>, AppError> {
        sqlx::query_as::<_, Program>("SELECT * FROM programs WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Program>, AppError> {
        sqlx::query_as::<_, Program>("SELECT * FROM programs ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_ids(&self, ids: &[String]) -> Result<Vec<Program>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, Program>("SELECT * FROM programs WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_children(&self, parent_id: &str) -> Result<Vec<Program>, AppError> {
        sqlx::query_as::<_, Program>("SELECT * FROM programs WHERE parent_id = $1 ORDER BY name")
            .bind(parent_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_external(&self) -> Result<Vec<Program>, AppError> {
        sqlx::query_as::<_, Program>("SELECT * FROM programs WHERE details_external = TRUE")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, program: &Program) -> Result<Program, AppError> {
        sqlx::query_as::<_, Program>(
            r#"UPDATE programs SET
                name = $1, parent_id = $2, slug = $3, image_url = $4, sub_text = $5,
                colour = $6, details_external = $7, external_link = $8
               WHERE id = $9 RETURNING *"#,
        )
            .bind(&program.name)
            .bind(&program.parent_id)
            .bind(&program.slug)
            .bind(&program.image_url)
            .bind(&program.sub_text)
            .bind(&program.colour)
            .bind(program.details_external)
            .bind(&program.external_link)
            .bind(&program.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM programs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Program not found".into()));
        }
        Ok(())
    }

    async fn filter_existing_slugs(&self, slugs: &[String]) -> Result<Vec<String>, AppError> {
        if slugs.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT slug FROM programs WHERE slug = ANY($1)",
        )
            .bind(slugs)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(rows.into_iter().map(|(slug,)| slug).collect())
    }
}
