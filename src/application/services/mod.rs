//! Business logic services for the application layer.

pub mod auth_service;
pub mod fanout;
pub mod flood_service;
pub mod purge_service;

pub use auth_service::AuthService;
pub use fanout::FanoutPurger;
pub use flood_service::FloodGuard;
pub use purge_service::{FLOOD_EVENT, FloodStatus, PurgeError, PurgeService, PurgeSettings};
