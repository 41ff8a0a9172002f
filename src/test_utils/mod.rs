//! Shared test utilities for skillcheck.

pub mod fixtures;

pub use fixtures::{UnitTestFixture, valid_skill_document};
