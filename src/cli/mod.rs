pub mod actions;
pub mod settings;
pub mod telemetry;

pub mod commands;
pub mod dispatch;

mod start;
pub use self::start::start;
