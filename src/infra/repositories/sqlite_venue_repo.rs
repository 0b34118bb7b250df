use crate::domain::{models::venue::{Venue, VenueWithCity}, ports::VenueRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

pub struct SqliteVenueRepo {
    pool: SqlitePool,
}

impl SqliteVenueRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VenueRepository for SqliteVenueRepo {
    async fn create(&self, venue: &Venue) -> Result<Venue, AppError> {
        sqlx::query_as::<_, Venue>(
            r#"INSERT INTO venues (id, name, slug, city_id, address, google_maps_url, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)
               RETURNING *"#,
        )
            .bind(&venue.id)
            .bind(&venue.name)
            .bind(&venue.slug)
            .bind(&venue.city_id)
            .bind(&venue.address)
            .bind(&venue.google_maps_url)
            .bind(venue.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Venue>, AppError> {
        sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Venue>, AppError> {
        sqlx::query_as::<_, Venue>("SELECT * FROM venues ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_ids_with_city(&self, ids: &[String]) -> Result<Vec<VenueWithCity>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            r#"SELECT v.id, v.name, v.slug, v.city_id, v.address, v.google_maps_url,
                      c.name AS city_name, c.slug AS city_slug
               FROM venues v
               JOIN cities c ON c.id = v.city_id
               WHERE v.id IN ("#,
        );
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        separated.push_unseparated(") ORDER BY v.name");

        builder
            .build_query_as::<VenueWithCity>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, venue: &Venue) -> Result<Venue, AppError> {
        sqlx::query_as::<_, Venue>(
            r#"UPDATE venues SET name = ?, slug = ?, city_id = ?, address = ?, google_maps_url = ?
               WHERE id = ? RETURNING *"#,
        )
            .bind(&venue.name)
            .bind(&venue.slug)
            .bind(&venue.city_id)
            .bind(&venue.address)
            .bind(&venue.google_maps_url)
            .bind(&venue.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM venues WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Venue not found".into()));
        }
        Ok(())
    }

    async fn filter_existing_slugs(&self, slugs: &[String]) -> Result<Vec<String>, AppError> {
        if slugs.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT slug FROM venues WHERE slug IN (");
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
