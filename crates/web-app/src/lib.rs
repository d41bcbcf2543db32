#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod log;
mod service;
mod settings;
pub mod ticker;

pub use service::Service;
pub use settings::{Settings, SettingsRepository, SettingsService, WeightUnit};
