pub mod app;
pub mod applications;
pub mod auth;
pub mod companies;
pub mod config;
pub mod contacts;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod extract;
pub mod interviews;
pub mod scoped;
pub mod seed;
pub mod state;
