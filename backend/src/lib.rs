//! Business layer for a second-hand book marketplace.
//!
//! Exposes three services over a pair of persistence ports: a user
//! management service, a book catalog service, and a session-scoped identity
//! manager. Persistence adapters live under [`outbound`]; the in-memory
//! adapter backs tests and local wiring.

pub mod domain;
pub mod outbound;
