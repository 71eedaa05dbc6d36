//! Core types and pure functions for the itemstore service.
//!
//! Nothing in this crate performs I/O. Storage backends and HTTP handlers live
//! in the `itemstore` crate and build on the types defined here.

pub mod item;
pub mod number;
pub mod storage;
pub mod update;
