//! SDK type → domain model conversions.

use aws_sdk_ecs::types::{Cluster, Service};

use offhours_core::ClientError;
use offhours_model::{ClusterDescription, SchedulingStrategy, ServiceDescription};

use crate::to_tags;

pub(crate) fn to_cluster(cluster: &Cluster) -> Result<ClusterDescription, ClientError> {
    let name = cluster
        .cluster_name()
        .ok_or_else(|| ClientError::Malformed("cluster without a name".to_string()))?;
    Ok(ClusterDescription {
        name: name.to_string(),
        tags: to_tags(cluster.tags()),
    })
}

pub(crate) fn to_service(service: &Service) -> Result<ServiceDescription, ClientError> {
    let name = service
        .service_name()
        .ok_or_else(|| ClientError::Malformed("service without a name".to_string()))?;
    let scheduling: SchedulingStrategy = service
        .scheduling_strategy()
        .map(|s| s.as_str())
        .unwrap_or("REPLICATED")
        .parse()
        .map_err(|e| ClientError::Malformed(format!("service {name}: {e}")))?;

    Ok(ServiceDescription {
        name: name.to_string(),
        scheduling,
        desired_count: service.desired_count(),
        tags: to_tags(service.tags()),
    })
}
