pub mod api;
pub mod config;
pub mod geo;
pub mod timezone;
pub mod validate;
