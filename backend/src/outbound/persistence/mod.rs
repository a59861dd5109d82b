//! Driven adapters for the persistence ports.

pub mod memory;

pub use memory::{InMemoryBookStore, InMemoryUserStore};
