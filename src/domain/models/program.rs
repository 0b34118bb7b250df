use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Program {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
    pub slug: String,
    pub image_url: Option<String>,
    pub sub_text: Option<String>,
    pub colour: Option<String>,
    pub details_external: bool,
    pub external_link: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Program {
    pub fn new(name: String, slug: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            parent_id: None,
            slug,
            image_url: None,
            sub_text: None,
            colour: None,
            details_external: false,
            external_link: None,
            created_at: Utc::now(),
        }
    }
}
