//! Content planner backend: scheduled social-media posts and meeting notes.
//!
//! Two owned stores (content items and notes) persist their full collections
//! to a local key-value store after every change. Views such as the upcoming
//! list, the month calendar and note search are recomputed from store
//! contents on demand.

pub mod caption;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod persistence;
pub mod planner;
pub mod seed;
pub mod store;
pub mod views;

pub use config::Config;
pub use error::{StoreError, ValidationError};
pub use planner::Planner;

/// Load `.env` and install the logger. Safe to call more than once.
pub fn init() {
    dotenv::dotenv().ok();
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init();
}
