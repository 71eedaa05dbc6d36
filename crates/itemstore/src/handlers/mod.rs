pub mod error;
pub mod health;
pub mod items;
pub mod response;

pub use error::ApiError;
