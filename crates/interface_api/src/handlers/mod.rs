//! Request handlers

pub mod accidents;
pub mod health;
pub mod settlements;
pub mod users;
pub mod vehicles;
pub mod workshops;
