//! Core library for rollcall.
//!
//! Reconciles member attendance against scheduled events stored in a Notion
//! workspace:
//! - `notion` wraps the REST API (wire types, client, lazy pagination)
//! - `Session` owns the member, event, sheet and table caches
//! - `codec` maps attendance rows to table-row blocks
//! - reconciliation, counter updates and the unexcused audit are methods
//!   on `Session`

pub mod codec;
pub mod config;
pub mod constants;
mod directory;
pub mod error;
pub mod event;
pub mod notion;
mod provision;
pub mod reconcile;
pub mod session;
pub mod status;
pub mod summary;
pub mod sync;
pub mod unexcused;

pub use codec::AttendanceRow;
pub use config::RollcallConfig;
pub use error::{RollcallError, RollcallResult};
pub use event::Event;
pub use reconcile::{
    AppendNew, AppendOutcome, ConflictResolver, EventLog, KeepExisting, ReconcileReport,
    Resolution,
};
pub use session::Session;
pub use status::AttendanceStatus;
pub use summary::Counters;
pub use unexcused::EventAttendance;
