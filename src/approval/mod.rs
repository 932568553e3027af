//! Approval decisions on suggested matches.
//!
//! The tracker owns the canonical decision map; presentation layers read and
//! write through its methods and never hold their own copy.

pub mod error;
pub mod tracker;
pub mod types;


pub use error::{ApprovalError, ApprovalResult};
pub use tracker::ApprovalTracker;
pub use types::{ApprovalStatus, ApprovalSummary, Decision, DecisionSource};
