use serde::Serialize;

use crate::domain::models::{
    program::Program,
    session::{Session, SessionCard},
    venue::VenueWithCity,
};

#[derive(Serialize)]
pub struct PublicProgramsResponse {
    pub programs: Vec<Program>,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

#[derive(Serialize)]
pub struct SessionListResponse {
    pub sessions: Vec<Session>,
    pub total: i64,
}

#[derive(Serialize)]
pub struct ProgramSummary {
    pub id: String,
    pub name: String,
    pub slug: String,
}

#[derive(Serialize)]
pub struct ProgramVenuesResponse {
    pub program: ProgramSummary,
    pub venues: Vec<VenueWithCity>,
}

#[derive(Serialize)]
pub struct CitySessionsResponse {
    pub city: String,
    pub sessions: Vec<SessionCard>,
}
