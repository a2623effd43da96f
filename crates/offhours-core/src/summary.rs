use std::collections::BTreeMap;

/// Per-run tally of successfully updated services.
#[derive(Default, Debug, Clone)]
pub struct RunSummary {
    updated: usize,
    by_cluster: BTreeMap<String, Vec<String>>,
}

impl RunSummary {
    /// Record a successful update of `service` in `cluster`.
    pub fn record(&mut self, cluster: &str, service: &str) {
        self.updated += 1;
        self.by_cluster
            .entry(cluster.to_string())
            .or_default()
            .push(service.to_string());
    }

    /// Total number of services updated in this run.
    pub fn updated(&self) -> usize {
        self.updated
    }

    /// Updated service names per cluster, in update order.
    pub fn by_cluster(&self) -> &BTreeMap<String, Vec<String>> {
        &self.by_cluster
    }
}
