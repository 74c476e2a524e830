// Application layer: UI-facing controller and presentation helpers.

pub mod presenter;
pub mod session;

pub use session::{RegistrationSession, SelectedShipment, UiEffect};
