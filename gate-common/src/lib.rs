//! Context Gate Common Types
//!
//! Shared types used by the capability gate and by host shims that call it.

pub mod hook;
pub mod model;
pub mod options;

pub use hook::{Decision, HookInput, HookOutput};
pub use model::ModelDescriptor;
pub use options::RequestOptions;
