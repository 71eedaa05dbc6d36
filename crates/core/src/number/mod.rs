mod codec;
mod error;
mod types;

pub use codec::{decode, encode, normalize};
pub use error::NumberError;
pub use types::{StoreNumber, MAX_MAGNITUDE, MAX_SIGNIFICANT_DIGITS, MIN_MAGNITUDE};
