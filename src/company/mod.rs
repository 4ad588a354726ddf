//! Company simulation: stats, weeks, investment, endings and session history.
pub mod ending;
pub mod events;
pub mod history;
pub mod investment;
pub mod plugin;
pub mod session;
pub mod stats;
pub mod systems;
pub mod team;

pub use plugin::CompanyPlugin;
