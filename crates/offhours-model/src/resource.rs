use serde::{Deserialize, Serialize};

use crate::domain::TagSet;
use crate::scheduling::SchedulingStrategy;

/// Cluster as described by the platform, with its tags.
///
/// A transient in-memory copy valid for one invocation only; the live
/// cluster-management service remains the source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterDescription {
    /// Cluster name.
    pub name: String,
    /// Tags attached to the cluster.
    #[serde(default, skip_serializing_if = "TagSet::is_empty")]
    pub tags: TagSet,
}

/// Service as described by the platform, with its tags and scheduling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescription {
    /// Service short name (trailing segment of the composite identifier).
    pub name: String,
    /// How the platform places replicas for this service.
    pub scheduling: SchedulingStrategy,
    /// Current target number of running replicas.
    pub desired_count: i32,
    /// Tags attached to the service.
    #[serde(default, skip_serializing_if = "TagSet::is_empty")]
    pub tags: TagSet,
}
