//! Seam to the external cluster-management platform.
//!
//! Concrete clients (e.g. the ECS-backed one) implement this trait; the
//! scheduler only ever talks to the platform through it.

use async_trait::async_trait;
use thiserror::Error;

use offhours_model::{ClusterDescription, ServiceDescription};

/// Error returned by a platform client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transient remote failure (network, throttling, 5xx). Retryable.
    #[error("remote call failed: {0}")]
    Remote(String),

    /// Response that cannot be interpreted (missing fields, unknown
    /// resource). Retrying will not help.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ClientError {
    /// Whether another attempt can reasonably change the outcome.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::Remote(_))
    }
}

/// One page of cluster identifiers.
#[derive(Debug, Clone, Default)]
pub struct ClusterPage {
    /// Cluster identifiers in platform order.
    pub cluster_ids: Vec<String>,
    /// Opaque continuation token; `None` on the last page.
    pub next_token: Option<String>,
}

/// One page of service identifiers within a cluster.
#[derive(Debug, Clone, Default)]
pub struct ServicePage {
    /// Composite service identifiers in platform order.
    pub service_ids: Vec<String>,
    /// Opaque continuation token; `None` on the last page.
    pub next_token: Option<String>,
}

/// Cluster-management platform operations used by the scheduler.
///
/// A client is responsible for:
/// - enumerating clusters and services (paginated via continuation tokens)
/// - describing resources together with their tags
/// - mutating a service's desired replica count
#[async_trait]
pub trait ClusterApi: Send + Sync + 'static {
    /// List one page of cluster identifiers.
    async fn list_clusters(&self, next_token: Option<String>) -> Result<ClusterPage, ClientError>;

    /// Describe the given clusters in one batched call, including tags.
    async fn describe_clusters(
        &self,
        cluster_ids: &[String],
    ) -> Result<Vec<ClusterDescription>, ClientError>;

    /// List one page of service identifiers within `cluster`.
    async fn list_services(
        &self,
        cluster: &str,
        next_token: Option<String>,
    ) -> Result<ServicePage, ClientError>;

    /// Describe a single service, including tags, by its short name.
    async fn describe_service(
        &self,
        cluster: &str,
        service: &str,
    ) -> Result<ServiceDescription, ClientError>;

    /// Set the desired replica count of a service.
    ///
    /// The platform reconciles the actual count asynchronously; this call
    /// only records the new target.
    async fn update_desired_count(
        &self,
        cluster: &str,
        service: &str,
        desired_count: i32,
    ) -> Result<(), ClientError>;
}
