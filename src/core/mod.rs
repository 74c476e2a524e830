pub mod assignment;

pub use crate::domain::model::{AssignmentReceipt, Parcel, ParcelDraft, Shipment};
pub use crate::domain::ports::{ConfigProvider, ShipmentRepository};
pub use crate::utils::error::Result;
pub use assignment::ShipmentAssignment;
