use thiserror::Error;

use crate::client::ClientError;

/// Fatal errors of a scheduling pass.
///
/// Only discovery and describe failures end up here; a single service's
/// update failing after retries is handled inline and never aborts the run.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("cluster discovery failed: {0}")]
    ClusterDiscovery(#[source] ClientError),

    #[error("listing services in cluster {cluster} failed: {source}")]
    ServiceDiscovery {
        cluster: String,
        #[source]
        source: ClientError,
    },

    #[error("describing service {service} in cluster {cluster} failed: {source}")]
    DescribeService {
        cluster: String,
        service: String,
        #[source]
        source: ClientError,
    },
}
