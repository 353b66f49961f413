pub mod app_state;
pub mod config;
pub mod errors;
pub mod http;
pub mod infra;
pub mod model;
pub mod repository;
pub mod service;
pub mod telemetry;
