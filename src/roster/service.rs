use super::gate::AuthorizationGate;
use super::status::{Action, ActionOutcome, ActionPhase, Rejection, StatusMessage};
use crate::blockchain::{
    RosterReader, RosterWriter, Student, parse_address, parse_enrollment,
};
use crate::session::{Session, SessionManager};
use anyhow::Result;
use ethers::types::{Address, TxHash};
use std::sync::Arc;
use tokio::sync::watch;

/// Admin and student management on top of the current session.
///
/// Every guard is re-evaluated against the contract on each call. Nothing
/// here deduplicates submissions, so two identical requests produce two
/// transactions.
pub struct RosterService {
    session: Arc<SessionManager>,
    status: watch::Sender<StatusMessage>,
    roster: watch::Sender<RosterSnapshot>,
}

/// Last roster read, and whether that read succeeded
#[derive(Debug, Clone, Default)]
struct RosterSnapshot {
    students: Arc<Vec<Student>>,
    fresh: bool,
}

impl RosterService {
    pub fn new(session: Arc<SessionManager>) -> Self {
        let (status, _) = watch::channel(StatusMessage::idle());
        let (roster, _) = watch::channel(RosterSnapshot::default());
        Self {
            session,
            status,
            roster,
        }
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    pub fn status(&self) -> StatusMessage {
        self.status.borrow().clone()
    }

    /// Last roster snapshot; may be stale
    pub fn students(&self) -> Arc<Vec<Student>> {
        Arc::clone(&self.roster.borrow().students)
    }

    /// False until a fetch succeeds, and again after any fetch fails
    pub fn is_fresh(&self) -> bool {
        self.roster.borrow().fresh
    }

    /// Report a condition that is not tied to a roster action, such as a missing wallet
    pub fn notify(&self, message: StatusMessage) {
        self.status.send_replace(message);
    }

    pub async fn get_owner(&self) -> Option<Address> {
        self.gate().get_owner().await
    }

    pub async fn is_admin(&self, address: Address) -> Option<bool> {
        self.gate().is_admin(address).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn add_admin(&self, address: &str) -> ActionOutcome {
        let action = Action::AddAdmin;
        let session = self.session.snapshot();
        let target = match Self::parse_target(address) {
            Ok(target) => target,
            Err(reason) => return self.reject(action, reason),
        };

        self.publish(StatusMessage::new(ActionPhase::CheckingAuthorization, ""));
        let gate = AuthorizationGate::new(session.reader.clone());

        if let Err(reason) = Self::require_owner(&gate, &session).await {
            return self.reject(action, reason);
        }
        if gate.is_admin(target).await.unwrap_or(false) {
            return self.reject(action, Rejection::AlreadyAdmin);
        }

        let Some(writer) = self.begin_submit(action, &session) else {
            return self.finish(action, Err(anyhow::anyhow!("Write contract is not created")));
        };
        let result = writer.add_admin(target).await;
        self.finish(action, result)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_admin(&self, address: &str) -> ActionOutcome {
        let action = Action::DeleteAdmin;
        let session = self.session.snapshot();
        let target = match Self::parse_target(address) {
            Ok(target) => target,
            Err(reason) => return self.reject(action, reason),
        };

        self.publish(StatusMessage::new(ActionPhase::CheckingAuthorization, ""));
        let gate = AuthorizationGate::new(session.reader.clone());

        let owner = match Self::require_owner(&gate, &session).await {
            Ok(owner) => owner,
            Err(reason) => return self.reject(action, reason),
        };
        if !gate.is_admin(target).await.unwrap_or(false) {
            return self.reject(action, Rejection::TargetNotAdmin);
        }
        if target == owner {
            return self.reject(action, Rejection::OwnerRemoval);
        }

        let Some(writer) = self.begin_submit(action, &session) else {
            return self.finish(action, Err(anyhow::anyhow!("Write contract is not created")));
        };
        let result = writer.delete_admin(target).await;
        self.finish(action, result)
    }

    /// The enrollment is only checked for fitting the contract's `uint256`
    #[tracing::instrument(skip(self))]
    pub async fn add_student(&self, name: &str, enrollment: &str) -> ActionOutcome {
        let action = Action::AddStudent;
        let session = self.session.snapshot();

        self.publish(StatusMessage::new(ActionPhase::CheckingAuthorization, ""));
        let gate = AuthorizationGate::new(session.reader.clone());

        if let Err(reason) = Self::require_admin(&gate, &session).await {
            return self.reject(action, reason);
        }

        let Some(writer) = self.begin_submit(action, &session) else {
            return self.finish(action, Err(anyhow::anyhow!("Write contract is not created")));
        };
        let result = match parse_enrollment(enrollment) {
            Ok(enrollment) => writer.add_student(name, enrollment).await,
            Err(e) => Err(e),
        };

        let outcome = self.finish(action, result);
        if outcome.is_success() {
            self.fetch_students().await;
        }
        outcome
    }

    /// `position` is the 1-based index the roster currently shows for the row
    #[tracing::instrument(skip(self))]
    pub async fn delete_student(&self, position: u64) -> ActionOutcome {
        let action = Action::DeleteStudent;
        let session = self.session.snapshot();

        self.publish(StatusMessage::new(ActionPhase::CheckingAuthorization, ""));
        let gate = AuthorizationGate::new(session.reader.clone());

        if let Err(reason) = Self::require_admin(&gate, &session).await {
            return self.reject(action, reason);
        }

        let Some(writer) = self.begin_submit(action, &session) else {
            return self.finish(action, Err(anyhow::anyhow!("Write contract is not created")));
        };
        let result = writer.delete_student(position).await;

        let outcome = self.finish(action, result);
        if outcome.is_success() {
            self.fetch_students().await;
        }
        outcome
    }

    /// Full resynchronisation of the roster, one read per position.
    ///
    /// Returns `None` when the read binding is missing or any read fails. The
    /// previous list is then kept but marked stale.
    pub async fn fetch_students(&self) -> Option<Arc<Vec<Student>>> {
        let Some(reader) = self.session.snapshot().reader.clone() else {
            tracing::warn!("Contract instance is not created");
            self.mark_stale();
            return None;
        };

        match read_roster(reader.as_ref()).await {
            Ok(students) => {
                let students = Arc::new(students);
                self.roster.send_replace(RosterSnapshot {
                    students: Arc::clone(&students),
                    fresh: true,
                });
                tracing::debug!(count = students.len(), "Roster refreshed");
                Some(students)
            }
            Err(e) => {
                tracing::error!("Error fetching students: {e:#}");
                self.mark_stale();
                None
            }
        }
    }

    fn mark_stale(&self) {
        self.roster.send_modify(|snapshot| snapshot.fresh = false);
    }

    fn gate(&self) -> AuthorizationGate {
        AuthorizationGate::new(self.session.snapshot().reader.clone())
    }

    fn parse_target(address: &str) -> Result<Address, Rejection> {
        parse_address(address).map_err(|_| Rejection::InvalidAddress(address.trim().to_string()))
    }

    async fn require_owner(gate: &AuthorizationGate, session: &Session) -> Result<Address, Rejection> {
        match (gate.get_owner().await, session.connected_account) {
            (Some(owner), Some(account)) if owner == account => Ok(owner),
            _ => Err(Rejection::NotOwner),
        }
    }

    async fn require_admin(gate: &AuthorizationGate, session: &Session) -> Result<(), Rejection> {
        let Some(account) = session.connected_account else {
            return Err(Rejection::CallerNotAdmin);
        };
        if gate.is_admin(account).await.unwrap_or(false) {
            Ok(())
        } else {
            Err(Rejection::CallerNotAdmin)
        }
    }

    fn begin_submit(&self, action: Action, session: &Session) -> Option<Arc<dyn RosterWriter>> {
        self.publish(StatusMessage::new(ActionPhase::Submitting, action.in_flight()));
        session.writer.clone()
    }

    fn reject(&self, action: Action, reason: Rejection) -> ActionOutcome {
        tracing::info!(?action, "Rejected before submission: {reason}");
        let outcome = ActionOutcome::Rejected(reason);
        self.publish(outcome.status(action));
        outcome
    }

    fn finish(&self, action: Action, result: Result<TxHash>) -> ActionOutcome {
        let outcome = match result {
            Ok(tx) => {
                tracing::info!(?action, ?tx, "Transaction succeeded");
                ActionOutcome::Succeeded(tx)
            }
            Err(e) => {
                tracing::error!(?action, "{}: {e:#}", action.failed());
                ActionOutcome::Failed
            }
        };
        self.publish(outcome.status(action));
        outcome
    }

    fn publish(&self, message: StatusMessage) {
        self.status.send_replace(message);
    }
}

async fn read_roster(reader: &dyn RosterReader) -> Result<Vec<Student>> {
    let count = reader.student_count().await?;
    let mut students = Vec::with_capacity(count.min(1024) as usize);
    for position in 1..=count {
        students.push(reader.student(position).await?);
    }
    Ok(students)
}
