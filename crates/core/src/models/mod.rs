pub mod audit;
pub mod instructor;
pub mod notification;
pub mod reservation;
pub mod settings;
pub mod stats;
pub mod user;
