use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub city_id: String,
    pub address: Option<String>,
    pub google_maps_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Venue {
    pub fn new(name: String, slug: String, city_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            slug,
            city_id,
            address: None,
            google_maps_url: None,
            created_at: Utc::now(),
        }
    }
}

/// Venue row joined with its city, as rendered on public listings.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct VenueWithCity {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub city_id: String,
    pub address: Option<String>,
    pub google_maps_url: Option<String>,
    pub city_name: String,
    pub city_slug: Option<String>,
}
