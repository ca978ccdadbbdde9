use ethers::types::TxHash;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Where a mutating action currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActionPhase {
    Idle,
    CheckingAuthorization,
    Rejected,
    Submitting,
    Succeeded,
    Failed,
}

/// Why an action stopped before anything was submitted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("You are not the owner!")]
    NotOwner,

    #[error("User is already an admin!")]
    AlreadyAdmin,

    #[error("User is not an admin!")]
    TargetNotAdmin,

    #[error("Owner can't be deleted!")]
    OwnerRemoval,

    #[error("You are not an admin!")]
    CallerNotAdmin,

    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

/// Roster mutations, each with its own status texts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddAdmin,
    DeleteAdmin,
    AddStudent,
    DeleteStudent,
}

impl Action {
    pub fn in_flight(self) -> &'static str {
        match self {
            Self::AddAdmin | Self::AddStudent => "Adding ...",
            Self::DeleteAdmin | Self::DeleteStudent => "Deleting ...",
        }
    }

    pub fn succeeded(self) -> &'static str {
        match self {
            Self::AddAdmin => "Admin added!",
            Self::DeleteAdmin => "Admin deleted!",
            Self::AddStudent => "Student added!",
            Self::DeleteStudent => "Student deleted!",
        }
    }

    pub fn failed(self) -> &'static str {
        match self {
            Self::AddAdmin => "Error adding admin!",
            Self::DeleteAdmin => "Error deleting admin!",
            Self::AddStudent => "Error adding student!",
            Self::DeleteStudent => "Error deleting student!",
        }
    }
}

/// The single status line shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusMessage {
    pub phase: ActionPhase,
    pub text: String,
}

impl StatusMessage {
    pub fn new(phase: ActionPhase, text: impl Into<String>) -> Self {
        Self {
            phase,
            text: text.into(),
        }
    }

    pub fn idle() -> Self {
        Self::new(ActionPhase::Idle, "")
    }
}

impl Default for StatusMessage {
    fn default() -> Self {
        Self::idle()
    }
}

/// Terminal state of one mutating action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Rejected(Rejection),
    Succeeded(TxHash),
    Failed,
}

impl ActionOutcome {
    pub fn phase(&self) -> ActionPhase {
        match self {
            Self::Rejected(_) => ActionPhase::Rejected,
            Self::Succeeded(_) => ActionPhase::Succeeded,
            Self::Failed => ActionPhase::Failed,
        }
    }

    pub fn status(&self, action: Action) -> StatusMessage {
        let text = match self {
            Self::Rejected(reason) => reason.to_string(),
            Self::Succeeded(_) => action.succeeded().to_string(),
            Self::Failed => action.failed().to_string(),
        };
        StatusMessage::new(self.phase(), text)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }
}
