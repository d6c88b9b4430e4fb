//! # Clinic Scheduler
//!
//! REST service for clinic rooms and the schedule slots booked in them.
//!
//! ## Architecture
//!
//! - **domain**: rooms, slots and the repository ports they are stored through
//! - **application**: room and slot services
//! - **infrastructure**: SeaORM/SQLite and in-memory repositories
//! - **interfaces**: axum REST API with Swagger documentation
//! - **shared**: pagination, query parameters, shutdown and error types
//!
//! Every list endpoint goes through [`paginate`], which runs a
//! [`QueryableCollection`] query and wraps the page with its metadata.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

pub use interfaces::http::create_api_router;

pub use shared::{
    extract_params, paginate, PageMeta, PageResult, PaginationError, PaginationOptions,
    QueryableCollection, RawPaginationQuery,
};
