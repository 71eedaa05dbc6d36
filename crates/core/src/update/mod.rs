//! Set-only partial update expressions.
//!
//! The store's update language does not allow literal attribute names or
//! values inside the expression text. [`UpdateExpression::build`] turns an
//! [`UpdateRequest`](crate::item::UpdateRequest) into `set #a = :a, …` plus two
//! tables resolving the `#` and `:` placeholders.

mod expression;
mod placeholder;

pub use expression::{key_exists_condition, SetClause, UpdateExpression, KEY_NAME_PLACEHOLDER};
pub use placeholder::{NAME_PREFIX, VALUE_PREFIX};
