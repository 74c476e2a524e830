pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::HttpShipmentRepository;
pub use app::{RegistrationSession, UiEffect};
pub use config::BackendSettings;
pub use crate::core::ShipmentAssignment;
pub use domain::model::{ParcelDraft, Shipment};
pub use utils::error::{ColisError, Result};
