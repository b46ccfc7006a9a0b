mod auth;
mod dashboard;
mod helpers;
mod resources;
