// Remote API access: typed errors, response decoding, and goal sources

pub mod error;
pub mod response;
pub mod source;
pub mod client;

pub use error::ApiError;
pub use response::{decode_response, decode_value};
pub use source::{FileSource, GoalSource};
pub use client::{ApiClient, CheckboxUpdate, UserInfo};
