//! API module
//!
//! Contains HTTP request handlers for the city registry endpoints

pub mod cities;
pub mod handlers;
pub mod states;
