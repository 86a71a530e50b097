//! HTTP handlers for the API builder.

pub mod builder;
pub use builder::*;
