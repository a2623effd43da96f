mod domain;
pub use domain::{DEFAULT_CLUSTER_TAG, DEFAULT_SERVICE_TAG, TAG_STARTING_COUNT, TAG_STOPPING_COUNT};
pub use domain::{Tag, TagSet};

mod error;
pub use error::{ModelError, ModelResult};

mod action;
pub use action::Action;

mod scheduling;
pub use scheduling::SchedulingStrategy;

mod resource;
pub use resource::{ClusterDescription, ServiceDescription};

mod api;
pub use api::{ActionRequest, ActionResponse};
