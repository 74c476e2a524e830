// Domain layer: models, business rules and ports. No HTTP or UI concerns here.

pub mod eligibility;
pub mod model;
pub mod parcel_type;
pub mod ports;
pub mod tracking;
