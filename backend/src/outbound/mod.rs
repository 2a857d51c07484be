//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! This module follows the hexagonal architecture pattern, providing concrete
//! implementations of the driven repository ports. Adapters are thin
//! translators that convert between domain types and storage
//! representations; they contain no business logic beyond the uniqueness
//! guards the ports document.
//!
//! - **memory**: a process-local store used by the integration suites and by
//!   embeddable single-node deployments.

pub mod memory;

pub use memory::InMemoryStore;
