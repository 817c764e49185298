//! Snapshot source abstraction.

use async_trait::async_trait;
use bytes::Bytes;

use crate::descriptor::SnapshotDescriptor;
use crate::error::Result;

/// A provider of radar composite snapshots.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// List the snapshots currently published.
    async fn list_latest(&self) -> Result<Vec<SnapshotDescriptor>>;

    /// Download the PNG bytes of a snapshot.
    async fn fetch_image_bytes(&self, descriptor: &SnapshotDescriptor) -> Result<Bytes>;
}

/// The snapshot with the most recent valid time.
///
/// Snapshots without a valid time only win when no snapshot has one.
pub fn latest(descriptors: &[SnapshotDescriptor]) -> Option<&SnapshotDescriptor> {
    descriptors.iter().max_by_key(|d| d.valid_time)
}
