//! Repository implementations
//!
//! One repository per aggregate, each owning its SQL. Repositories return
//! domain types, never raw rows.

pub mod accidents;
pub mod users;
pub mod vehicles;
pub mod workshops;

pub use accidents::{
    AccidentRepository, DashboardStats, RecordFilter, RecordPage, StatusFilter,
};
pub use users::{Role, UserAccount, UserRepository};
pub use vehicles::VehicleRepository;
pub use workshops::WorkshopRepository;
