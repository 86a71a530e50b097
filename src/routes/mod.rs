pub mod builder;
pub mod common;

pub use builder::builder_routes;
pub use common::common_routes;
