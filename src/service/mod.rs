//! ApiBuilderService and the endpoint registry it delegates to.

mod builder;
mod registry;
pub use builder::ApiBuilderService;
pub use registry::{EndpointRegistry, HttpEndpointRegistry};

#[cfg(test)]
pub(crate) use builder::tests::RecordingRegistry;
