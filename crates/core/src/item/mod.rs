mod error;
mod types;

pub use error::ValidationError;
pub use types::{parse_body, validate_path_id, Item, UpdateRequest, ID_ATTRIBUTE};
