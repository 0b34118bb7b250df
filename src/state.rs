use std::sync::Arc;
use crate::domain::ports::{
    CityRepository, ContactRepository, ProgramRepository, SessionRepository, VenueRepository,
};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub city_repo: Arc<dyn CityRepository>,
    pub venue_repo: Arc<dyn VenueRepository>,
    pub contact_repo: Arc<dyn ContactRepository>,
    pub program_repo: Arc<dyn ProgramRepository>,
    pub session_repo: Arc<dyn SessionRepository>,
}
