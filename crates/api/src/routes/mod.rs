pub mod admin;
pub mod auth;
pub mod health;
pub mod notifications;
pub mod reservations;
pub mod settings;
