use crate::domain::{models::program::Program, ports::ProgramRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

pub struct SqliteProgramRepo {
    pool: SqlitePool,
}

impl SqliteProgramRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProgramRepository for SqliteProgramRepo {
    async fn create(&self, program: &Program) -> Result<Program, AppError> {
        sqlx::query_as::<_, Program>(
            r#"INSERT INTO programs (
                id, name, parent_id, slug, image_url, sub_text, colour,
                details_external, external_link, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
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
        sqlx::query_as::<_, Program>("SELECT * FROM programs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Program>, AppError> {
        sqlx::query_as::<_, Program>("SELECT * FROM programs WHERE slug = ?")
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

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT * FROM programs WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        separated.push_unseparated(")");

        builder
            .build_query_as::<Program>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_children(&self, parent_id: &str) -> Result<Vec<Program>, AppError> {
        sqlx::query_as::<_, Program>("SELECT * FROM programs WHERE parent_id = ? ORDER BY name")
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
                name = ?, parent_id = ?, slug = ?, image_url = ?, sub_text = ?,
                colour = ?, details_external = ?, external_link = ?
               WHERE id = ? RETURNING *"#,
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
        let result = sqlx::query("DELETE FROM programs WHERE id = ?")
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

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT slug FROM programs WHERE slug IN (");
        let mut separated = builder.separated(", ");
        for slug in slugs {
            separated.push_bind(slug);
        }
        separated.push_unseparated(")");

        let rows: Vec<(String,)> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(rows.into_iter().map(|(slug,)| slug).collect())
    }
}
