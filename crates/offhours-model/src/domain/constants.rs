//! Well-known tag keys used across the scheduler.
//!
//! Keeping them here avoids scattering magic strings throughout the codebase.
//! All of them can be overridden through `RunConfig`; these are the defaults.

/// Marker tag key that qualifies a *cluster* for scheduling.
///
/// Only the presence of the key matters; the value is ignored.
pub const DEFAULT_CLUSTER_TAG: &str = "offhours";

/// Marker tag key that qualifies a *service* for scheduling.
///
/// Only the presence of the key matters; the value is ignored.
pub const DEFAULT_SERVICE_TAG: &str = "offhours";

/// Tag key holding the desired replica count applied on `start`.
pub const TAG_STARTING_COUNT: &str = "StartingCount";

/// Tag key holding the desired replica count applied on `stop`.
pub const TAG_STOPPING_COUNT: &str = "StoppingCount";
