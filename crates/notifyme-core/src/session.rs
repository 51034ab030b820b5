//! Form state machine and the session that drives it.
//!
//! ```text
//! Idle ──submit──▶ Checking ──exists──▶ Duplicate ──▶ Settled
//!                     │                                  ▲  │
//!                     └──absent──▶ Creating ─────────────┘  │
//!                                                           │
//! Idle ◀────────────────── reset_delay ─────────────────────┘
//! ```
//!
//! A submission in `Checking`, `Duplicate` or `Creating` locks the form;
//! a second submit is rejected with [`SignupError::SubmissionInFlight`].
//! Every submission gets a generation number so a reset timer left over
//! from an earlier submission never clears a newer one.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::backend::SignupBackend;
use crate::error::{SignupError, SignupResult};
use crate::types::{FormField, SignupFields, StatusMessage, SubmissionOutcome};
use crate::workflow::SignupWorkflow;

/// Where the current submission is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Checking,
    Duplicate,
    Creating,
    Settled,
}

impl SubmissionState {
    /// Whether a request is outstanding and the submit control must be disabled.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            SubmissionState::Checking | SubmissionState::Duplicate | SubmissionState::Creating
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Checking => "checking",
            SubmissionState::Duplicate => "duplicate",
            SubmissionState::Creating => "creating",
            SubmissionState::Settled => "settled",
        }
    }
}

/// In-memory form: the three inputs, the status line and the machine state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub fields: SignupFields,
    pub status: Option<StatusMessage>,
    pub state: SubmissionState,
    generation: u64,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of submissions started so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_locked(&self) -> bool {
        self.state.is_in_flight()
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.fields.name = value,
            FormField::Surname => self.fields.surname = value,
            FormField::Email => self.fields.email = value,
        }
    }

    /// `Idle|Settled → Checking`. Returns the fields snapshot and generation.
    pub fn begin_submit(&mut self) -> SignupResult<(SignupFields, u64)> {
        if self.is_locked() {
            return Err(SignupError::SubmissionInFlight);
        }
        self.fields.validate()?;

        self.generation += 1;
        self.state = SubmissionState::Checking;
        self.status = None;
        Ok((self.fields.clone(), self.generation))
    }

    /// Move submission `generation` to `stage`. False if it is stale.
    pub fn advance(&mut self, generation: u64, stage: SubmissionState) -> bool {
        if generation != self.generation || !self.is_locked() {
            return false;
        }
        self.state = stage;
        true
    }

    /// Record the outcome of submission `generation`.
    pub fn settle(&mut self, generation: u64, outcome: &SubmissionOutcome) -> bool {
        if generation != self.generation || !self.is_locked() {
            return false;
        }
        self.state = SubmissionState::Settled;
        self.status = Some(outcome.status_message());
        true
    }

    /// Unlock the form if submission `generation` never settled.
    ///
    /// Fields are kept so the visitor can submit again.
    pub fn abandon(&mut self, generation: u64) -> bool {
        if generation != self.generation || !self.is_locked() {
            return false;
        }
        self.state = SubmissionState::Idle;
        self.status = None;
        true
    }

    /// Clear fields and status if submission `generation` is still settled.
    pub fn expire(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.state != SubmissionState::Settled {
            return false;
        }
        self.fields = SignupFields::default();
        self.status = None;
        self.state = SubmissionState::Idle;
        true
    }
}

/// One visitor's form bound to a workflow.
///
/// State changes are published on a watch channel; front-ends subscribe and
/// re-render. Each submission runs on a task owned by the session, so a
/// caller dropping [`submit`](Self::submit) early does not strand the form
/// in an in-flight state. In-flight requests and pending reset timers are
/// cancelled by [`shutdown`](Self::shutdown) or when the session is dropped.
pub struct SignupSession<B> {
    workflow: Arc<SignupWorkflow<B>>,
    state: Arc<watch::Sender<FormState>>,
    cancel: CancellationToken,
}

impl<B: SignupBackend + 'static> SignupSession<B> {
    pub fn new(workflow: SignupWorkflow<B>) -> Self {
        let (tx, _rx) = watch::channel(FormState::new());
        Self {
            workflow: Arc::new(workflow),
            state: Arc::new(tx),
            cancel: CancellationToken::new(),
        }
    }

    pub fn workflow(&self) -> &SignupWorkflow<B> {
        &self.workflow
    }

    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.state.subscribe()
    }

    /// Current form state.
    pub fn snapshot(&self) -> FormState {
        self.state.borrow().clone()
    }

    pub fn set_field(&self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        self.state.send_modify(|form| form.set_field(field, value));
    }

    /// Submit the current fields and wait for the outcome.
    ///
    /// The submission keeps running if this future is dropped; it still
    /// settles and schedules the reset timer.
    pub async fn submit(&self) -> SignupResult<SubmissionOutcome> {
        if self.cancel.is_cancelled() {
            return Err(SignupError::Cancelled);
        }

        let mut started = Err(SignupError::SubmissionInFlight);
        self.state.send_if_modified(|form| match form.begin_submit() {
            Ok(snapshot) => {
                started = Ok(snapshot);
                true
            }
            Err(e) => {
                started = Err(e);
                false
            }
        });
        let (fields, generation) = started?;
        debug!(generation, "Submission started");

        let workflow = Arc::clone(&self.workflow);
        let state = Arc::clone(&self.state);
        let cancel = self.cancel.clone();

        let task = tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = cancel.cancelled() => {
                    if state.send_if_modified(|form| form.abandon(generation)) {
                        debug!(generation, "Submission abandoned");
                    }
                    return None;
                }
                outcome = workflow.run(&fields, |stage| {
                    state.send_if_modified(|form| form.advance(generation, stage));
                }) => outcome,
            };

            state.send_if_modified(|form| form.settle(generation, &outcome));
            debug!(
                generation,
                status = outcome.status_message().text(),
                "Submission settled"
            );

            schedule_reset(state, cancel.child_token(), workflow.reset_delay(), generation);
            Some(outcome)
        });

        match task.await {
            Ok(Some(outcome)) => Ok(outcome),
            Ok(None) => Err(SignupError::Cancelled),
            Err(e) => {
                warn!(generation, error = %e, "Submission task failed");
                self.state
                    .send_if_modified(|form| form.abandon(generation));
                Err(SignupError::Cancelled)
            }
        }
    }

    /// Cancel in-flight requests and pending timers.
    ///
    /// A submission cut short returns the form to `Idle` with its fields kept.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

fn schedule_reset(
    state: Arc<watch::Sender<FormState>>,
    cancel: CancellationToken,
    delay: Duration,
    generation: u64,
) {
    tokio::spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => {}
            _ = tokio::time::sleep(delay) => {
                if state.send_if_modified(|form| form.expire(generation)) {
                    debug!(generation, "Form reset");
                }
            }
        }
    });
}

impl<B> Drop for SignupSession<B> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SignupRecord;

    fn filled() -> FormState {
        let mut form = FormState::new();
        form.set_field(FormField::Name, "Ada");
        form.set_field(FormField::Surname, "Lovelace");
        form.set_field(FormField::Email, "ada@example.com");
        form
    }

    #[test]
    fn test_begin_submit_locks_form() {
        let mut form = filled();
        let (fields, generation) = form.begin_submit().unwrap();
        assert_eq!(fields.email, "ada@example.com");
        assert_eq!(generation, 1);
        assert_eq!(form.state, SubmissionState::Checking);
        assert!(form.is_locked());

        assert!(matches!(
            form.begin_submit(),
            Err(SignupError::SubmissionInFlight)
        ));
    }

    #[test]
    fn test_invalid_fields_do_not_start() {
        let mut form = FormState::new();
        form.set_field(FormField::Email, "not-an-email");
        assert!(matches!(form.begin_submit(), Err(SignupError::InvalidInput(_))));
        assert_eq!(form.state, SubmissionState::Idle);
        assert_eq!(form.generation(), 0);
    }

    #[test]
    fn test_full_cycle() {
        let mut form = filled();
        let (fields, generation) = form.begin_submit().unwrap();
        assert!(form.advance(generation, SubmissionState::Creating));

        let outcome = SubmissionOutcome::Created(SignupRecord::from(&fields));
        assert!(form.settle(generation, &outcome));
        assert_eq!(form.state, SubmissionState::Settled);
        assert_eq!(form.status, Some(StatusMessage::Registered));
        assert!(!form.is_locked());

        assert!(form.expire(generation));
        assert_eq!(form.state, SubmissionState::Idle);
        assert!(form.fields.is_empty());
        assert_eq!(form.status, None);
    }

    #[test]
    fn test_stale_generation_ignored() {
        let mut form = filled();
        let (_, first) = form.begin_submit().unwrap();
        assert!(form.settle(first, &SubmissionOutcome::Duplicate));

        // Resubmitting from Settled starts a new generation.
        let (_, second) = form.begin_submit().unwrap();
        assert_eq!(second, first + 1);

        assert!(!form.expire(first));
        assert!(!form.settle(first, &SubmissionOutcome::Failed));
        assert_eq!(form.state, SubmissionState::Checking);
        assert_eq!(form.fields.name, "Ada");
    }

    #[test]
    fn test_expire_requires_settled() {
        let mut form = filled();
        let (_, generation) = form.begin_submit().unwrap();
        assert!(!form.expire(generation));
        assert_eq!(form.state, SubmissionState::Checking);
    }

    #[test]
    fn test_abandon_unlocks_and_keeps_fields() {
        let mut form = filled();
        let (_, generation) = form.begin_submit().unwrap();
        assert!(form.advance(generation, SubmissionState::Creating));

        assert!(form.abandon(generation));
        assert_eq!(form.state, SubmissionState::Idle);
        assert!(!form.is_locked());
        assert_eq!(form.fields.email, "ada@example.com");

        // Nothing left to abandon, and a settled form is not touched.
        assert!(!form.abandon(generation));
        let (_, next) = form.begin_submit().unwrap();
        assert!(form.settle(next, &SubmissionOutcome::Duplicate));
        assert!(!form.abandon(next));
        assert_eq!(form.state, SubmissionState::Settled);
    }

    #[test]
    fn test_state_labels() {
        assert_eq!(SubmissionState::default(), SubmissionState::Idle);
        assert_eq!(SubmissionState::Creating.label(), "creating");
        assert!(SubmissionState::Duplicate.is_in_flight());
        assert!(!SubmissionState::Settled.is_in_flight());
    }
}
