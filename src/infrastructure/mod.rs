//! Infrastructure layer - adapters to external systems

pub mod blockchain;
