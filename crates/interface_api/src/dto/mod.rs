//! Request/response data transfer objects

pub mod accidents;
pub mod settlements;
pub mod users;
pub mod vehicles;
pub mod workshops;
