use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Session {
    pub id: String,
    pub program_id: String,
    pub venue_id: String,
    pub contact_id: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub language: Option<String>,
    pub is_published: bool,
    pub registrations_allowed: bool,
    pub registration_link: Option<String>,
    pub open_without_registration: bool,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(program_id: String, venue_id: String, contact_id: String, start_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            program_id,
            venue_id,
            contact_id,
            start_date,
            end_date: None,
            start_time: None,
            end_time: None,
            language: None,
            is_published: false,
            registrations_allowed: false,
            registration_link: None,
            open_without_registration: false,
            created_at: Utc::now(),
        }
    }
}

/// Published session projected to the program id and start date, the only
/// columns the public listing aggregation needs.
#[derive(Debug, FromRow, Clone)]
pub struct SessionStart {
    pub program_id: String,
    pub start_date: Option<NaiveDate>,
}

/// Session joined with program, venue, city, and contact columns for the
/// public session cards.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct SessionCard {
    pub id: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub language: Option<String>,
    pub registrations_allowed: bool,
    pub registration_link: Option<String>,
    pub open_without_registration: bool,
    pub program_id: String,
    pub program_name: String,
    pub program_slug: String,
    pub program_image_url: Option<String>,
    pub program_sub_text: Option<String>,
    pub program_colour: Option<String>,
    pub venue_id: String,
    pub venue_name: String,
    pub venue_slug: String,
    pub google_maps_url: Option<String>,
    pub city_name: Option<String>,
    pub city_slug: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_whatsapp: Option<String>,
}
