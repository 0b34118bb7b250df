use crate::domain::{models::city::City, ports::CityRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteCityRepo {
    pool: SqlitePool,
}

impl SqliteCityRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CityRepository for SqliteCityRepo {
    async fn create(&self, city: &City) -> Result<City, AppError> {
        sqlx::query_as::<_, City>(
            r#"INSERT INTO cities (id, name, slug, created_at)
               VALUES (?, ?, ?, ?)
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
        sqlx::query_as::<_, City>("SELECT * FROM cities WHERE id = ?")
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
            "UPDATE cities SET name = ?, slug = ? WHERE id = ? RETURNING *",
        )
            .bind(&city.name)
            .bind(&city.slug)
            .bind(&city.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM cities WHERE id = ?")
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
