pub mod admin_reservations;
pub mod admin_settings;
pub mod admin_users;
pub mod audit;
pub mod auth;
pub mod instructor;
pub mod notifications;
pub mod reservations;
pub mod settings;
pub mod stats;
pub mod support;
