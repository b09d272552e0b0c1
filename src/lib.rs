//! kys-backend: REST backend for the sneaker catalog (accounts, catalog, login) on SQLite.

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use routes::app;
pub use state::AppState;
