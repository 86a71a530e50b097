pub mod types;
pub mod builder;
pub mod graph;
pub mod loader;
pub mod settings;
pub mod validator;

pub use types::*;
pub use builder::*;
pub use graph::*;
pub use loader::*;
pub use settings::*;
pub use validator::*;
