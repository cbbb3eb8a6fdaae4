//! Integration test suite for the TDOP parser workspace
//!
//! This crate provides integration tests that verify components work
//! together across component boundaries: scanner, engine and driver.

/// Re-export components for test convenience
pub mod components {
    pub use core_types;
    pub use tdop_cli;
    pub use tdop_parser;
}
