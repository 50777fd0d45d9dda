#![warn(clippy::uninlined_format_args)]

pub mod env_identity;
pub mod memory_store;

pub use env_identity::EnvIdentityProvider;
pub use memory_store::MemoryStore;
