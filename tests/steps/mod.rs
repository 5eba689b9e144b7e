//! Step definitions for the behavioural suite.

mod config_steps;
mod ctl_steps;
mod logger_steps;

pub use config_steps::ConfigWorld;
pub use ctl_steps::CtlWorld;
pub use logger_steps::LoggerWorld;
