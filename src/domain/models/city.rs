use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct City {
    pub id: String,
    pub name: String,
    pub slug: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl City {
    pub fn new(name: String, slug: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            slug,
            created_at: Utc::now(),
        }
    }
}
