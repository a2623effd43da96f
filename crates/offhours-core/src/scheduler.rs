//! One discovery → filter → update pass over tagged clusters and services.
//!
//! - Owns the run configuration and the platform client.
//! - Discovery/describe failures are fatal to the run and propagate.
//! - A single service's update failure is non-fatal: logged, skipped,
//!   excluded from the tally.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use offhours_model::{Action, ActionResponse, TagSet};

use crate::client::{ClientError, ClusterApi};
use crate::config::RunConfig;
use crate::error::CoreError;
use crate::retry::retry;
use crate::summary::RunSummary;

/// Tag-driven start/stop scheduler.
pub struct Scheduler {
    config: RunConfig,
    client: Arc<dyn ClusterApi>,
}

impl Scheduler {
    /// Create a scheduler over the given platform client.
    pub fn new(config: RunConfig, client: Arc<dyn ClusterApi>) -> Self {
        Self { config, client }
    }

    /// Run one full scheduling pass for the requested action.
    ///
    /// Steps:
    /// 1. Validate the action (`"start"` / `"stop"`); anything else yields a
    ///    400 response without touching the platform.
    /// 2. Discover marker-tagged clusters; zero matches short-circuits to a
    ///    200 "no action taken" response.
    /// 3. Per cluster, per service: filter, resolve the desired count,
    ///    dispatch the update.
    /// 4. Summarize the tally.
    ///
    /// Only fatal discovery/describe errors surface as `Err`; partial update
    /// failures degrade to a smaller tally.
    #[instrument(level = "debug", skip(self))]
    pub async fn run(&self, action: &str) -> Result<ActionResponse, CoreError> {
        let action: Action = match action.parse() {
            Ok(a) => a,
            Err(e) => {
                warn!(action, "rejecting request");
                return Ok(ActionResponse::bad_request(e.to_string()));
            }
        };

        info!(action = action.as_str(), "starting scheduling pass");
        let clusters = self.clusters_with_tag().await?;
        if clusters.is_empty() {
            info!(
                tag = %self.config.cluster_tag_key,
                "no tagged clusters, nothing to do"
            );
            return Ok(ActionResponse::ok(format!(
                "no clusters tagged '{}', no action taken",
                self.config.cluster_tag_key
            )));
        }

        let mut summary = RunSummary::default();
        for cluster in &clusters {
            let services = self.services_in_cluster(cluster).await?;
            for service in &services {
                self.apply(action, cluster, service, &mut summary).await?;
            }
        }

        let body = match summary.updated() {
            0 => "no qualifying services found".to_string(),
            1 => format!("1 service {}", action.effect()),
            n => format!("{} services {}", n, action.effect()),
        };
        info!(updated = summary.updated(), "scheduling pass finished");
        Ok(ActionResponse::ok(body))
    }

    /// Names of all clusters carrying the cluster marker tag.
    ///
    /// Follows the listing continuation token across pages, then describes
    /// all clusters in one batched call. Order is as returned by the
    /// platform.
    async fn clusters_with_tag(&self) -> Result<Vec<String>, CoreError> {
        let mut ids = Vec::new();
        let mut token: Option<String> = None;
        loop {
            let page = retry(
                "list-clusters",
                self.config.list_attempts,
                self.config.retry_delay,
                ClientError::is_retryable,
                || self.client.list_clusters(token.clone()),
            )
            .await
            .map_err(CoreError::ClusterDiscovery)?;

            ids.extend(page.cluster_ids);
            token = page.next_token;
            if token.is_none() {
                break;
            }
        }
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let described = retry(
            "describe-clusters",
            self.config.call_attempts,
            self.config.retry_delay,
            ClientError::is_retryable,
            || self.client.describe_clusters(&ids),
        )
        .await
        .map_err(CoreError::ClusterDiscovery)?;

        Ok(described
            .into_iter()
            .filter(|c| c.tags.contains_key(&self.config.cluster_tag_key))
            .map(|c| c.name)
            .collect())
    }

    /// Short names of all services in `cluster`, across all pages.
    async fn services_in_cluster(&self, cluster: &str) -> Result<Vec<String>, CoreError> {
        let mut names = Vec::new();
        let mut token: Option<String> = None;
        loop {
            let page = retry(
                "list-services",
                self.config.call_attempts,
                self.config.retry_delay,
                ClientError::is_retryable,
                || self.client.list_services(cluster, token.clone()),
            )
            .await
            .map_err(|source| CoreError::ServiceDiscovery {
                cluster: cluster.to_string(),
                source,
            })?;

            names.extend(page.service_ids.iter().map(|id| short_name(id).to_string()));
            token = page.next_token;
            if token.is_none() {
                break;
            }
        }
        debug!(cluster, count = names.len(), "services discovered");
        Ok(names)
    }

    /// Filter one service, resolve its desired count and dispatch the update.
    ///
    /// Disqualified services (non-replicated scheduling, missing marker tag,
    /// unparsable count tag) are skipped with a log line and the run
    /// continues.
    async fn apply(
        &self,
        action: Action,
        cluster: &str,
        service: &str,
        summary: &mut RunSummary,
    ) -> Result<(), CoreError> {
        let desc = retry(
            "describe-service",
            self.config.call_attempts,
            self.config.retry_delay,
            ClientError::is_retryable,
            || self.client.describe_service(cluster, service),
        )
        .await
        .map_err(|source| CoreError::DescribeService {
            cluster: cluster.to_string(),
            service: service.to_string(),
            source,
        })?;

        if !desc.scheduling.is_replicated() {
            debug!(cluster, service, "skipping: scheduling is not replicated");
            return Ok(());
        }
        if !desc.tags.contains_key(&self.config.service_tag_key) {
            debug!(cluster, service, "skipping: marker tag absent");
            return Ok(());
        }

        let desired = match self.resolve_count(action, &desc.tags) {
            Ok(n) => n,
            Err(value) => {
                warn!(
                    cluster,
                    service,
                    key = self.config.count_tag_key(action),
                    value,
                    "skipping: count tag is not an integer"
                );
                return Ok(());
            }
        };

        self.update(cluster, service, desired, summary).await;
        Ok(())
    }

    /// Desired count for `action` from the service's tags.
    ///
    /// An absent or empty count tag falls back to the action default
    /// (1 for start, 0 for stop). A non-empty value that is not an integer
    /// is returned as `Err` with the offending value.
    fn resolve_count(&self, action: Action, tags: &TagSet) -> Result<i32, String> {
        match tags.get(self.config.count_tag_key(action)) {
            None => Ok(action.default_count()),
            Some(v) if v.is_empty() => Ok(action.default_count()),
            Some(v) => v.parse().map_err(|_| v.to_string()),
        }
    }

    /// Issue the desired-count update; exhaustion is non-fatal.
    async fn update(&self, cluster: &str, service: &str, desired: i32, summary: &mut RunSummary) {
        let outcome = retry(
            "update-service",
            self.config.call_attempts,
            self.config.retry_delay,
            ClientError::is_retryable,
            || self.client.update_desired_count(cluster, service, desired),
        )
        .await;

        match outcome {
            Ok(()) => {
                info!(cluster, service, desired, "desired count updated");
                summary.record(cluster, service);
            }
            Err(e) => {
                warn!(cluster, service, error = %e, "service left unchanged after retries");
            }
        }
    }
}

/// Trailing path segment of a composite identifier.
fn short_name(id: &str) -> &str {
    id.rsplit('/').next().unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use offhours_model::{ClusterDescription, SchedulingStrategy, ServiceDescription, Tag, TagSet};

    use super::{Scheduler, short_name};
    use crate::client::{ClientError, ClusterApi, ClusterPage, ServicePage};
    use crate::config::RunConfig;

    /// Scripted in-memory platform used by the tests below.
    #[derive(Default)]
    struct FakePlatform {
        /// Cluster pages returned by `list_clusters`, in order.
        cluster_pages: Mutex<Vec<ClusterPage>>,
        /// Clusters returned by `describe_clusters`.
        clusters: Vec<ClusterDescription>,
        /// Service identifiers per cluster (single page each).
        services: BTreeMap<String, Vec<String>>,
        /// Service descriptions keyed by `(cluster, short name)`.
        descriptions: BTreeMap<(String, String), ServiceDescription>,
        /// Number of initial `describe_clusters` calls that fail.
        describe_clusters_failures: AtomicUsize,
        /// Service short names whose update always fails.
        failing_updates: Vec<String>,
        /// Service short names whose describe always fails.
        failing_describes: Vec<String>,

        list_cluster_calls: AtomicUsize,
        describe_cluster_calls: AtomicUsize,
        list_service_calls: AtomicUsize,
        describe_service_calls: Mutex<Vec<String>>,
        updates: Mutex<Vec<(String, String, i32)>>,
    }

    impl FakePlatform {
        fn with_clusters(clusters: Vec<ClusterDescription>) -> Self {
            let ids: Vec<String> = clusters.iter().map(|c| c.name.clone()).collect();
            Self {
                cluster_pages: Mutex::new(vec![ClusterPage {
                    cluster_ids: ids,
                    next_token: None,
                }]),
                clusters,
                ..Self::default()
            }
        }

        fn add_service(&mut self, cluster: &str, id: &str, desc: ServiceDescription) {
            self.services
                .entry(cluster.to_string())
                .or_default()
                .push(id.to_string());
            self.descriptions
                .insert((cluster.to_string(), desc.name.clone()), desc);
        }

        fn updates(&self) -> Vec<(String, String, i32)> {
            self.updates.lock().unwrap().clone()
        }

        fn remote_calls(&self) -> usize {
            self.list_cluster_calls.load(Ordering::SeqCst)
                + self.describe_cluster_calls.load(Ordering::SeqCst)
                + self.list_service_calls.load(Ordering::SeqCst)
                + self.describe_service_calls.lock().unwrap().len()
                + self.updates.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ClusterApi for FakePlatform {
        async fn list_clusters(
            &self,
            _next_token: Option<String>,
        ) -> Result<ClusterPage, ClientError> {
            self.list_cluster_calls.fetch_add(1, Ordering::SeqCst);
            let mut pages = self.cluster_pages.lock().unwrap();
            if pages.is_empty() {
                return Ok(ClusterPage::default());
            }
            Ok(pages.remove(0))
        }

        async fn describe_clusters(
            &self,
            cluster_ids: &[String],
        ) -> Result<Vec<ClusterDescription>, ClientError> {
            self.describe_cluster_calls.fetch_add(1, Ordering::SeqCst);
            let left = self.describe_clusters_failures.load(Ordering::SeqCst);
            if left > 0 {
                self.describe_clusters_failures.store(left - 1, Ordering::SeqCst);
                return Err(ClientError::Remote("throttled".into()));
            }
            Ok(self
                .clusters
                .iter()
                .filter(|c| cluster_ids.contains(&c.name))
                .cloned()
                .collect())
        }

        async fn list_services(
            &self,
            cluster: &str,
            _next_token: Option<String>,
        ) -> Result<ServicePage, ClientError> {
            self.list_service_calls.fetch_add(1, Ordering::SeqCst);
            Ok(ServicePage {
                service_ids: self.services.get(cluster).cloned().unwrap_or_default(),
                next_token: None,
            })
        }

        async fn describe_service(
            &self,
            cluster: &str,
            service: &str,
        ) -> Result<ServiceDescription, ClientError> {
            self.describe_service_calls
                .lock()
                .unwrap()
                .push(service.to_string());
            if self.failing_describes.iter().any(|s| s == service) {
                return Err(ClientError::Remote("connection reset".into()));
            }
            self.descriptions
                .get(&(cluster.to_string(), service.to_string()))
                .cloned()
                .ok_or_else(|| ClientError::Malformed(format!("no such service: {service}")))
        }

        async fn update_desired_count(
            &self,
            cluster: &str,
            service: &str,
            desired_count: i32,
        ) -> Result<(), ClientError> {
            if self.failing_updates.iter().any(|s| s == service) {
                return Err(ClientError::Remote("throttled".into()));
            }
            self.updates.lock().unwrap().push((
                cluster.to_string(),
                service.to_string(),
                desired_count,
            ));
            Ok(())
        }
    }

    fn tagged(keys: &[(&str, &str)]) -> TagSet {
        keys.iter().map(|&(k, v)| Tag::new(k, v)).collect()
    }

    fn cluster(name: &str, marked: bool) -> ClusterDescription {
        ClusterDescription {
            name: name.into(),
            tags: if marked {
                tagged(&[("offhours", "true")])
            } else {
                TagSet::new()
            },
        }
    }

    fn service(name: &str, scheduling: SchedulingStrategy, tags: TagSet) -> ServiceDescription {
        ServiceDescription {
            name: name.into(),
            scheduling,
            desired_count: 2,
            tags,
        }
    }

    fn test_config() -> RunConfig {
        RunConfig {
            retry_delay: Duration::ZERO,
            ..RunConfig::default()
        }
    }

    fn scheduler(platform: FakePlatform) -> (Scheduler, Arc<FakePlatform>) {
        let platform = Arc::new(platform);
        (
            Scheduler::new(test_config(), platform.clone()),
            platform,
        )
    }

    #[tokio::test]
    async fn invalid_action_is_rejected_without_remote_calls() {
        let (sched, platform) = scheduler(FakePlatform::with_clusters(vec![cluster("prod", true)]));

        let resp = sched.run("restart").await.unwrap();

        assert_eq!(resp.status_code, 400);
        assert_eq!(platform.remote_calls(), 0);
    }

    #[tokio::test]
    async fn no_tagged_clusters_short_circuits() {
        let (sched, platform) =
            scheduler(FakePlatform::with_clusters(vec![cluster("prod", false)]));

        let resp = sched.run("stop").await.unwrap();

        assert_eq!(resp.status_code, 200);
        assert!(resp.body.contains("no clusters tagged"));
        assert_eq!(platform.list_service_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn daemon_services_are_never_updated() {
        let mut platform = FakePlatform::with_clusters(vec![cluster("prod", true)]);
        platform.add_service(
            "prod",
            "arn:aws:ecs:eu-west-1:123:service/prod/logger",
            service(
                "logger",
                SchedulingStrategy::Daemon,
                tagged(&[("offhours", "true")]),
            ),
        );
        let (sched, platform) = scheduler(platform);

        let resp = sched.run("stop").await.unwrap();

        assert!(resp.body.contains("no qualifying services"));
        assert!(platform.updates().is_empty());
    }

    #[tokio::test]
    async fn unmarked_services_are_never_updated() {
        let mut platform = FakePlatform::with_clusters(vec![cluster("prod", true)]);
        platform.add_service(
            "prod",
            "arn:aws:ecs:eu-west-1:123:service/prod/billing",
            service(
                "billing",
                SchedulingStrategy::Replicated,
                tagged(&[("team", "payments")]),
            ),
        );
        let (sched, platform) = scheduler(platform);

        let resp = sched.run("stop").await.unwrap();

        assert!(resp.body.contains("no qualifying services"));
        assert!(platform.updates().is_empty());
    }

    #[tokio::test]
    async fn start_without_count_tag_defaults_to_one() {
        let mut platform = FakePlatform::with_clusters(vec![cluster("prod", true)]);
        platform.add_service(
            "prod",
            "arn:aws:ecs:eu-west-1:123:service/prod/billing",
            service(
                "billing",
                SchedulingStrategy::Replicated,
                tagged(&[("offhours", "true")]),
            ),
        );
        let (sched, platform) = scheduler(platform);

        let resp = sched.run("start").await.unwrap();

        assert_eq!(resp.body, "1 service started");
        assert_eq!(
            platform.updates(),
            [("prod".to_string(), "billing".to_string(), 1)]
        );
    }

    #[tokio::test]
    async fn starting_count_tag_overrides_default() {
        let mut platform = FakePlatform::with_clusters(vec![cluster("prod", true)]);
        platform.add_service(
            "prod",
            "arn:aws:ecs:eu-west-1:123:service/prod/billing",
            service(
                "billing",
                SchedulingStrategy::Replicated,
                tagged(&[("offhours", "true"), ("StartingCount", "5")]),
            ),
        );
        let (sched, platform) = scheduler(platform);

        sched.run("start").await.unwrap();

        assert_eq!(
            platform.updates(),
            [("prod".to_string(), "billing".to_string(), 5)]
        );
    }

    #[tokio::test]
    async fn stop_without_count_tag_defaults_to_zero() {
        let mut platform = FakePlatform::with_clusters(vec![cluster("prod", true)]);
        platform.add_service(
            "prod",
            "arn:aws:ecs:eu-west-1:123:service/prod/billing",
            service(
                "billing",
                SchedulingStrategy::Replicated,
                tagged(&[("offhours", "true")]),
            ),
        );
        let (sched, platform) = scheduler(platform);

        sched.run("stop").await.unwrap();

        assert_eq!(
            platform.updates(),
            [("prod".to_string(), "billing".to_string(), 0)]
        );
    }

    #[tokio::test]
    async fn empty_count_tag_value_uses_default() {
        let mut platform = FakePlatform::with_clusters(vec![cluster("prod", true)]);
        platform.add_service(
            "prod",
            "arn:aws:ecs:eu-west-1:123:service/prod/billing",
            service(
                "billing",
                SchedulingStrategy::Replicated,
                tagged(&[("offhours", "true"), ("StoppingCount", "")]),
            ),
        );
        let (sched, platform) = scheduler(platform);

        sched.run("stop").await.unwrap();

        assert_eq!(
            platform.updates(),
            [("prod".to_string(), "billing".to_string(), 0)]
        );
    }

    #[tokio::test]
    async fn unparsable_count_tag_skips_the_service() {
        let mut platform = FakePlatform::with_clusters(vec![cluster("prod", true)]);
        platform.add_service(
            "prod",
            "arn:aws:ecs:eu-west-1:123:service/prod/billing",
            service(
                "billing",
                SchedulingStrategy::Replicated,
                tagged(&[("offhours", "true"), ("StartingCount", "many")]),
            ),
        );
        platform.add_service(
            "prod",
            "arn:aws:ecs:eu-west-1:123:service/prod/search",
            service(
                "search",
                SchedulingStrategy::Replicated,
                tagged(&[("offhours", "true")]),
            ),
        );
        let (sched, platform) = scheduler(platform);

        let resp = sched.run("start").await.unwrap();

        // The typo'd service is skipped; the rest of the run continues.
        assert_eq!(resp.body, "1 service started");
        assert_eq!(
            platform.updates(),
            [("prod".to_string(), "search".to_string(), 1)]
        );
    }

    #[tokio::test]
    async fn transient_describe_failures_are_absorbed_by_retries() {
        let mut platform = FakePlatform::with_clusters(vec![cluster("prod", true)]);
        platform.describe_clusters_failures = AtomicUsize::new(2);
        platform.add_service(
            "prod",
            "arn:aws:ecs:eu-west-1:123:service/prod/billing",
            service(
                "billing",
                SchedulingStrategy::Replicated,
                tagged(&[("offhours", "true")]),
            ),
        );
        let (sched, _) = scheduler(platform);

        let resp = sched.run("stop").await.unwrap();

        assert_eq!(resp.status_code, 200);
        assert_eq!(resp.body, "1 service stopped");
    }

    #[tokio::test]
    async fn exhausted_discovery_is_fatal() {
        let mut platform = FakePlatform::with_clusters(vec![cluster("prod", true)]);
        // More failures than the call budget allows.
        platform.describe_clusters_failures = AtomicUsize::new(100);
        let (sched, _) = scheduler(platform);

        assert!(sched.run("stop").await.is_err());
    }

    #[tokio::test]
    async fn exhausted_describe_service_is_fatal() {
        let mut platform = FakePlatform::with_clusters(vec![cluster("prod", true)]);
        platform.add_service(
            "prod",
            "arn:aws:ecs:eu-west-1:123:service/prod/billing",
            service(
                "billing",
                SchedulingStrategy::Replicated,
                tagged(&[("offhours", "true")]),
            ),
        );
        platform.failing_describes = vec!["billing".into()];
        let (sched, _) = scheduler(platform);

        assert!(sched.run("stop").await.is_err());
    }

    #[tokio::test]
    async fn exhausted_update_is_non_fatal_and_excluded_from_tally() {
        let mut platform = FakePlatform::with_clusters(vec![cluster("prod", true)]);
        platform.add_service(
            "prod",
            "arn:aws:ecs:eu-west-1:123:service/prod/billing",
            service(
                "billing",
                SchedulingStrategy::Replicated,
                tagged(&[("offhours", "true")]),
            ),
        );
        platform.add_service(
            "prod",
            "arn:aws:ecs:eu-west-1:123:service/prod/search",
            service(
                "search",
                SchedulingStrategy::Replicated,
                tagged(&[("offhours", "true")]),
            ),
        );
        platform.failing_updates = vec!["billing".into()];
        let (sched, platform) = scheduler(platform);

        let resp = sched.run("stop").await.unwrap();

        assert_eq!(resp.status_code, 200);
        assert_eq!(resp.body, "1 service stopped");
        assert_eq!(
            platform.updates(),
            [("prod".to_string(), "search".to_string(), 0)]
        );
    }

    #[tokio::test]
    async fn start_is_idempotent_across_invocations() {
        let mut platform = FakePlatform::with_clusters(vec![cluster("prod", true)]);
        platform.add_service(
            "prod",
            "arn:aws:ecs:eu-west-1:123:service/prod/billing",
            service(
                "billing",
                SchedulingStrategy::Replicated,
                tagged(&[("offhours", "true"), ("StartingCount", "3")]),
            ),
        );
        let (sched, platform) = scheduler(platform);

        sched.run("start").await.unwrap();
        sched.run("start").await.unwrap();

        // Not state-aware across invocations: the same update twice.
        assert_eq!(
            platform.updates(),
            [
                ("prod".to_string(), "billing".to_string(), 3),
                ("prod".to_string(), "billing".to_string(), 3),
            ]
        );
    }

    #[tokio::test]
    async fn cluster_listing_follows_pagination() {
        let mut platform = FakePlatform::with_clusters(vec![
            cluster("prod", false),
            cluster("batch", true),
        ]);
        platform.cluster_pages = Mutex::new(vec![
            ClusterPage {
                cluster_ids: vec!["prod".into()],
                next_token: Some("page2".into()),
            },
            ClusterPage {
                cluster_ids: vec!["batch".into()],
                next_token: None,
            },
        ]);
        platform.add_service(
            "batch",
            "arn:aws:ecs:eu-west-1:123:service/batch/reindex",
            service(
                "reindex",
                SchedulingStrategy::Replicated,
                tagged(&[("offhours", "true")]),
            ),
        );
        let (sched, platform) = scheduler(platform);

        let resp = sched.run("stop").await.unwrap();

        assert_eq!(resp.body, "1 service stopped");
        assert_eq!(platform.list_cluster_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn composite_identifiers_are_reduced_to_short_names() {
        let mut platform = FakePlatform::with_clusters(vec![cluster("prod", true)]);
        platform.add_service(
            "prod",
            "arn:aws:ecs:eu-west-1:123:service/prod/billing",
            service(
                "billing",
                SchedulingStrategy::Replicated,
                tagged(&[("offhours", "true")]),
            ),
        );
        let (sched, platform) = scheduler(platform);

        sched.run("stop").await.unwrap();

        assert_eq!(
            *platform.describe_service_calls.lock().unwrap(),
            ["billing"]
        );
    }

    #[test]
    fn short_name_keeps_trailing_segment() {
        assert_eq!(
            short_name("arn:aws:ecs:eu-west-1:123:service/prod/billing"),
            "billing"
        );
        assert_eq!(short_name("billing"), "billing");
    }
}
