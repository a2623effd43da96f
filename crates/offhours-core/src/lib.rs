pub mod client;
pub mod config;
pub mod error;
pub mod retry;
pub mod scheduler;
pub mod summary;

pub mod prelude {
    pub use crate::client::{ClientError, ClusterApi, ClusterPage, ServicePage};
    pub use crate::config::RunConfig;
    pub use crate::error::CoreError;
    pub use crate::scheduler::Scheduler;
    pub use crate::summary::RunSummary;
}

pub use client::{ClientError, ClusterApi, ClusterPage, ServicePage};
pub use config::RunConfig;
pub use error::CoreError;
pub use scheduler::Scheduler;
pub use summary::RunSummary;
