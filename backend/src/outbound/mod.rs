//! Outbound adapters implementing domain ports.
//!
//! Adapters translate between domain types and storage representations and
//! contain no business rules.
//!
//! - **memory**: in-process document store backing both collections.

pub mod memory;
