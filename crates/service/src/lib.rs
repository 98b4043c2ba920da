//! Storage layer for the contact service.
//! - Defines the `ContactStore` seam the HTTP layer talks to.
//! - Ships a single in-memory implementation with per-operation locking.

pub mod contacts;
pub mod memory;
