use crate::domain::models::{
    city::City, contact::Contact, program::Program,
    session::{Session, SessionCard, SessionStart}, venue::{Venue, VenueWithCity},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Date predicate applied to public session queries. `OnOrAfter` is the
/// normal "upcoming" view; `On` is used when a share link pins an exact date.
#[derive(Debug, Clone, Copy)]
pub enum SessionDateFilter {
    OnOrAfter(NaiveDate),
    On(NaiveDate),
}

#[async_trait]
pub trait CityRepository: Send + Sync {
    async fn create(&self, city: &City) -> Result<City, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<City>, AppError>;
    async fn list(&self) -> Result<Vec<City>, AppError>;
    async fn update(&self, city: &City) -> Result<City, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait VenueRepository: Send + Sync {
    async fn create(&self, venue: &Venue) -> Result<Venue, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Venue>, AppError>;
    async fn list(&self) -> Result<Vec<Venue>, AppError>;
    async fn list_by_ids_with_city(&self, ids: &[String]) -> Result<Vec<VenueWithCity>, AppError>;
    async fn update(&self, venue: &Venue) -> Result<Venue, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    /// Which of the candidate slugs exist in the venues table.
    async fn filter_existing_slugs(&self, slugs: &[String]) -> Result<Vec<String>, AppError>;
}

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create(&self, contact: &Contact) -> Result<Contact, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Contact>, AppError>;
    async fn list(&self) -> Result<Vec<Contact>, AppError>;
    async fn update(&self, contact: &Contact) -> Result<Contact, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ProgramRepository: Send + Sync {
    async fn create(&self, program: &Program) -> Result<Program, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Program>, AppError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Program>, AppError>;
    async fn list(&self) -> Result<Vec<Program>, AppError>;
    async fn list_by_ids(&self, ids: &[String]) -> Result<Vec<Program>, AppError>;
    async fn list_children(&self, parent_id: &str) -> Result<Vec<Program>, AppError>;
    async fn list_external(&self) -> Result<Vec<Program>, AppError>;
    async fn update(&self, program: &Program) -> Result<Program, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    /// Which of the candidate slugs exist in the programs table.
    async fn filter_existing_slugs(&self, slugs: &[String]) -> Result<Vec<String>, AppError>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &Session) -> Result<Session, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Session>, AppError>;
    /// Admin listing, ordered by start date. Returns the page and the total row count.
    async fn list_paginated(&self, offset: i64, limit: i64) -> Result<(Vec<Session>, i64), AppError>;
    /// Published sessions with `start_date >= today`, projected to `(program_id, start_date)`.
    async fn list_published_upcoming_starts(&self, today: NaiveDate) -> Result<Vec<SessionStart>, AppError>;
    /// Published session cards matching the date filter, optionally narrowed
    /// to a set of program ids.
    async fn list_published_cards(
        &self,
        filter: SessionDateFilter,
        program_ids: Option<&[String]>,
    ) -> Result<Vec<SessionCard>, AppError>;
    /// Distinct venue ids with published upcoming sessions for the given programs.
    async fn list_venue_ids_for_programs(
        &self,
        program_ids: &[String],
        today: NaiveDate,
    ) -> Result<Vec<String>, AppError>;
    async fn update(&self, session: &Session) -> Result<Session, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}
