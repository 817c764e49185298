//! Radar snapshot retrieval.
//!
//! A [`SnapshotSource`] lists the latest composite snapshots and downloads
//! their PNG bytes. [`ArsoClient`] implements it against the ARSO INCA
//! nowcasting timeline. There is no retry or caching here: failures
//! propagate to the caller.

pub mod client;
pub mod descriptor;
pub mod error;
pub mod source;

pub use client::{ArsoClient, ArsoClientConfig};
pub use descriptor::{parse_timeline, SnapshotDescriptor, TimelineEntry};
pub use error::{Result, SnapshotError};
pub use source::{latest, SnapshotSource};
