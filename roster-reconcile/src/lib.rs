//! # roster-reconcile
//!
//! Drives a reconciliation session against a [`roster_core::HostingApi`] and a
//! [`roster_core::Prompter`]: fetch → present → confirm → apply.
//!
//! Call [`Reconciler::manage`] to reconcile an existing repository or
//! [`Reconciler::create`] to create one and invite its initial members.

pub mod error;
pub mod event;
pub mod report;
pub mod session;
pub mod stage;

pub use error::ReconcileError;
pub use event::{Action, Event, Reporter};
pub use report::{ApplyReport, OperationOutcome, SessionOutcome};
pub use session::{Reconciler, SessionOptions};
pub use stage::Stage;
