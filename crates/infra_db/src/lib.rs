//! PostgreSQL persistence for the back office
//!
//! Provides the connection pool, schema migrations, and one repository per
//! aggregate. SQL stays inside this crate; everything above it works with
//! domain types.

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{create_pool, run_migrations, DatabaseConfig, DatabasePool};
pub use repositories::{
    AccidentRepository, DashboardStats, RecordFilter, RecordPage, Role, StatusFilter,
    UserAccount, UserRepository, VehicleRepository, WorkshopRepository,
};
