//! Pipeline for detecting and announcing new shows.
//!
//! - `detect`: compare two year snapshots
//! - `dispatch`: one push notification per new show
//! - `poll`: timer-driven loop holding the retained snapshot
//! - `run_pipeline`: wire real clients into the loop

pub mod detect;
pub mod dispatch;
pub mod pipeline;
pub mod poll;

#[cfg(test)]
pub(crate) mod testing;

pub use detect::{Change, ChangeDetector, detect_change};
pub use dispatch::{DispatchFailure, DispatchReport, dispatch_shows};
pub use pipeline::run_pipeline;
pub use poll::{PollSettings, PollState, Poller, TickOutcome};
