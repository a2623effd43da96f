//! ECS-backed implementation of the scheduler's platform seam.
//!
//! Maps the `ClusterApi` operations onto ListClusters / DescribeClusters /
//! ListServices / DescribeServices / UpdateService. The SDK applies its own
//! standard retry and backoff for throttling underneath the scheduler's
//! coarser retry loop.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_ecs::types::{ClusterField, ServiceField};
use tracing::debug;

use offhours_core::{ClientError, ClusterApi, ClusterPage, ServicePage};
use offhours_model::{ClusterDescription, ServiceDescription, Tag, TagSet};

mod convert;
use convert::{to_cluster, to_service};

/// `ClusterApi` over an `aws_sdk_ecs::Client`.
pub struct EcsClusterApi {
    inner: aws_sdk_ecs::Client,
}

impl EcsClusterApi {
    /// Build a client from the ambient AWS configuration
    /// (environment, profile, instance role).
    pub async fn from_env() -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        Self::new(aws_sdk_ecs::Client::new(&config))
    }

    /// Wrap an existing SDK client.
    pub fn new(inner: aws_sdk_ecs::Client) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ClusterApi for EcsClusterApi {
    async fn list_clusters(&self, next_token: Option<String>) -> Result<ClusterPage, ClientError> {
        let out = self
            .inner
            .list_clusters()
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| ClientError::Remote(e.to_string()))?;

        Ok(ClusterPage {
            cluster_ids: out.cluster_arns().to_vec(),
            next_token: out.next_token().map(str::to_string),
        })
    }

    async fn describe_clusters(
        &self,
        cluster_ids: &[String],
    ) -> Result<Vec<ClusterDescription>, ClientError> {
        let out = self
            .inner
            .describe_clusters()
            .set_clusters(Some(cluster_ids.to_vec()))
            .include(ClusterField::Tags)
            .send()
            .await
            .map_err(|e| ClientError::Remote(e.to_string()))?;

        debug!(count = out.clusters().len(), "clusters described");
        out.clusters().iter().map(to_cluster).collect()
    }

    async fn list_services(
        &self,
        cluster: &str,
        next_token: Option<String>,
    ) -> Result<ServicePage, ClientError> {
        let out = self
            .inner
            .list_services()
            .cluster(cluster)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| ClientError::Remote(e.to_string()))?;

        Ok(ServicePage {
            service_ids: out.service_arns().to_vec(),
            next_token: out.next_token().map(str::to_string),
        })
    }

    async fn describe_service(
        &self,
        cluster: &str,
        service: &str,
    ) -> Result<ServiceDescription, ClientError> {
        let out = self
            .inner
            .describe_services()
            .cluster(cluster)
            .services(service)
            .include(ServiceField::Tags)
            .send()
            .await
            .map_err(|e| ClientError::Remote(e.to_string()))?;

        let first = out
            .services()
            .first()
            .ok_or_else(|| ClientError::Malformed(format!("no such service: {service}")))?;
        to_service(first)
    }

    async fn update_desired_count(
        &self,
        cluster: &str,
        service: &str,
        desired_count: i32,
    ) -> Result<(), ClientError> {
        self.inner
            .update_service()
            .cluster(cluster)
            .service(service)
            .desired_count(desired_count)
            .send()
            .await
            .map_err(|e| ClientError::Remote(e.to_string()))?;
        Ok(())
    }
}

/// Tags as returned by the SDK, dropping entries without a key.
fn to_tags(tags: &[aws_sdk_ecs::types::Tag]) -> TagSet {
    tags.iter()
        .filter_map(|t| {
            t.key()
                .map(|k| Tag::new(k, t.value().unwrap_or_default()))
        })
        .collect()
}
