//! SQL compiler: identifiers from config, values as `:name` placeholders unless embedded as literals.

mod builder;
pub mod conditions;
pub mod extract;
pub mod joins;
pub use builder::*;
pub use conditions::*;
pub use extract::*;
pub use joins::*;
