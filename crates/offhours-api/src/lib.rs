mod adapter;
pub use adapter::SchedulerAdapter;

mod error;
pub use error::ApiError;

mod handler;
pub use handler::ActionApiHandler;

mod http;
pub use http::HttpApi;
