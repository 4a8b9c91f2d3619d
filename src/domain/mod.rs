//! Domain layer - validation rules and payload records

pub mod user;
