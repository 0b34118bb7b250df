pub mod postgres_city_repo;
pub mod postgres_contact_repo;
pub mod postgres_program_repo;
pub mod postgres_session_repo;
pub mod postgres_venue_repo;
pub mod sqlite_city_repo;
pub mod sqlite_contact_repo;
pub mod sqlite_program_repo;
pub mod sqlite_session_repo;
pub mod sqlite_venue_repo;
