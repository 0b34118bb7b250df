use crate::domain::{models::city::City, ports::CityRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresCityRepo {
    pool: PgPool,
}

impl PostgresCityRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CityRepository for PostgresCityRepo {
    async fn create(&self, city: &City) -> Result<City, AppError> {
        sqlx::query_as::<_, City>(
            r#"INSERT INTO cities (id, name, slug, created_at)
               VALUES ($1, $2, $3, $4)
               RETURNING *"#,
        )
            .bind(&city.id)
            .bind(&city.name)
            .bind(&city.slug)
            .bind(city.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<City>, AppError> {
        sqlx::query_as::<_, City>("SELECT * FROM cities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<City>, AppError> {
        sqlx::query_as::<_, City>("SELECT * FROM cities ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, city: &City) -> Result<City, AppError> {
        sqlx::query_as::<_, City>(
            "UPDATE cities SET name = $1, slug = $2 WHERE id = $3 RETURNING *",
        )
            .bind(&city.name)
            .bind(&city.slug)
            .bind(&city.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM cities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("City not found".into()));
        }
        Ok(())
    }
}
