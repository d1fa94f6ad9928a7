//! Integration tests for the fgsheet library and binary.
//!
//! These tests validate end-to-end workflows that span multiple modules: reading a
//! sample sheet from disk, validating it, and writing the derived tables.

mod helpers;
mod test_library_scenarios;
mod test_override_cycles_command;
mod test_validate_command;
