mod constants;
pub use constants::{
    DEFAULT_CLUSTER_TAG, DEFAULT_SERVICE_TAG, TAG_STARTING_COUNT, TAG_STOPPING_COUNT,
};

mod tag;
pub use tag::{Tag, TagSet};
