use crate::domain::{
    models::session::{Session, SessionCard, SessionStart},
    ports::{SessionDateFilter, SessionRepository},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, QueryBuilder};

const CARD_COLUMNS: &str = r#"
    s.id, s.start_date, s.end_date, s.start_time, s.end_time, s.language,
    s.registrations_allowed, s.registration_link, s.open_without_registration,
    s.program_id, p.name AS program_name, p.slug AS program_slug,
    p.image_url AS program_image_url, p.sub_text AS program_sub_text, p.colour AS program_colour,
    s.venue_id, v.name AS venue_name, v.slug AS venue_slug, v.google_maps_url,
    c.name AS city_name, c.slug AS city_slug,
    ct.phone AS contact_phone, ct.whatsapp AS contact_whatsapp
"#;

const CARD_JOINS: &str = r#"
    FROM sessions s
    JOIN programs p ON p.id = s.program_id
    JOIN venues v ON v.id = s.venue_id
    LEFT JOIN cities c ON c.id = v.city_id
    JOIN contacts ct ON ct.id = s.contact_id
"#;

pub struct PostgresSessionRepo {
    pool: PgPool,
}

impl PostgresSessionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepo {
    async fn create(&self, session: &Session) -> Result<Session, AppError> {
        sqlx::query_as::<_, Session>(
            r#"INSERT INTO sessions (
                id, program_id, venue_id, contact_id, start_date, end_date,
                start_time, end_time, language, is_published, registrations_allowed,
                registration_link, open_without_registration, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *"#,
        )
            .bind(&session.id)
            .bind(&session.program_id)
            .bind(&session.venue_id)
            .bind(&session.contact_id)
            .bind(session.start_date)
            .bind(session.end_date)
            .bind(&session.start_time)
            .bind(&session.end_time)
            .bind(&session.language)
            .bind(session.is_published)
            .bind(session.registrations_allowed)
            .bind(&session.registration_link)
            .bind(session.open_without_registration)
            .bind(session.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Session>, AppError> {
        sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_paginated(&self, offset: i64, limit: i64) -> Result<(Vec<Session>, i64), AppError> {
        let sessions = sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions ORDER BY start_date ASC LIMIT $1 OFFSET $2",
        )
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sessions")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok((sessions, total))
    }

    async fn list_published_upcoming_starts(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<SessionStart>, AppError> {
        sqlx::query_as::<_, SessionStart>(
            r#"SELECT program_id, start_date FROM sessions
               WHERE is_published = TRUE AND start_date >= $1"#,
        )
            .bind(today)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_published_cards(
        &self,
        filter: SessionDateFilter,
        program_ids: Option<&[String]>,
    ) -> Result<Vec<SessionCard>, AppError> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder.push(CARD_COLUMNS);
        builder.push(CARD_JOINS);
        builder.push(" WHERE s.is_published = TRUE");

        match filter {
            SessionDateFilter::OnOrAfter(date) => {
                builder.push(" AND s.start_date >= ");
                builder.push_bind(date);
            }
            SessionDateFilter::On(date) => {
                builder.push(" AND s.start_date = ");
                builder.push_bind(date);
            }
        }

        if let Some(ids) = program_ids {
            if ids.is_empty() {
                return Ok(Vec::new());
            }
            builder.push(" AND s.program_id IN (");
            let mut separated = builder.separated(", ");
            for id in ids {
                separated.push_bind(id);
            }
            separated.push_unseparated(")");
        }

        builder.push(" ORDER BY s.start_date ASC");

        builder
            .build_query_as::<SessionCard>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_venue_ids_for_programs(
        &self,
        program_ids: &[String],
        today: NaiveDate,
    ) -> Result<Vec<String>, AppError> {
        if program_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            r#"SELECT DISTINCT venue_id FROM sessions
               WHERE is_published = TRUE AND start_date >= "#,
        );
        builder.push_bind(today);
        builder.push(" AND program_id IN (");
        let mut separated = builder.separated(", ");
        for id in program_ids {
            separated.push_bind(id);
        }
        separated.push_unseparated(")");

        let rows: Vec<(String,)> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    async fn update(&self, session: &Session) -> Result<Session, AppError> {
        sqlx::query_as::<_, Session>(
            r#"UPDATE sessions SET
                program_id = $1, venue_id = $2, contact_id = $3, start_date = $4, end_date = $5,
                start_time = $6, end_time = $7, language = $8, is_published = $9,
                registrations_allowed = $10, registration_link = $11, open_without_registration = $12
               WHERE id = $13 RETURNING *"#,
        )
            .bind(&session.program_id)
            .bind(&session.venue_id)
            .bind(&session.contact_id)
            .bind(session.start_date)
            .bind(session.end_date)
            .bind(&session.start_time)
            .bind(&session.end_time)
            .bind(&session.language)
            .bind(session.is_published)
            .bind(session.registrations_allowed)
            .bind(&session.registration_link)
            .bind(session.open_without_registration)
            .bind(&session.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Session not found".into()));
        }
        Ok(())
    }
}
