pub mod gate;
pub mod service;
pub mod status;

pub use gate::AuthorizationGate;
pub use service::RosterService;
pub use status::{Action, ActionOutcome, ActionPhase, Rejection, StatusMessage};
