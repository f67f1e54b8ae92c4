//! Infrastructure layer: concrete implementations of the domain traits

pub mod account;
pub mod auth;
pub mod logging;
pub mod storage;
pub mod teacher;
pub mod uploads;
