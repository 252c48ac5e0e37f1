//! Service layer for upstream reads and push delivery.
//!
//! This module provides the network-facing components:
//! - Archive: per-year show counts and latest shows
//! - Push: topic notification delivery

pub mod archive;
pub mod push;

pub use archive::{ArchiveClient, ShowArchive};
pub use push::{PushClient, PushNotifier};
