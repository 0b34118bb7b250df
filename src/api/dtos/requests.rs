use serde::Deserialize;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Deserialize)]
pub struct CreateCityRequest {
    pub name: String,
}

#[derive(Deserialize)]
pub struct UpdateCityRequest {
    pub name: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateVenueRequest {
    pub name: String,
    pub city_id: String,
    pub address: Option<String>,
    pub google_maps_url: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateVenueRequest {
    pub name: Option<String>,
    pub city_id: Option<String>,
    pub address: Option<String>,
    pub google_maps_url: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateContactRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub city_id: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub city_id: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateProgramRequest {
    pub name: String,
    pub parent_id: Option<String>,
    pub image_url: Option<String>,
    pub sub_text: Option<String>,
    pub details_external: Option<bool>,
    pub external_link: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateProgramRequest {
    pub name: Option<String>,
    pub parent_id: Option<String>,
    pub image_url: Option<String>,
    pub sub_text: Option<String>,
    pub details_external: Option<bool>,
    pub external_link: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateSessionRequest {
    pub program_id: String,
    pub venue_id: String,
    pub contact_id: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub language: Option<String>,
    pub is_published: Option<bool>,
    pub registrations_allowed: Option<bool>,
    pub registration_link: Option<String>,
    pub open_without_registration: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpdateSessionRequest {
    pub program_id: Option<String>,
    pub venue_id: Option<String>,
    pub contact_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub language: Option<String>,
    pub is_published: Option<bool>,
    pub registrations_allowed: Option<bool>,
    pub registration_link: Option<String>,
    pub open_without_registration: Option<bool>,
}
