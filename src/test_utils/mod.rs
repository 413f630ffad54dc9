//! Common test utilities for expo-fix tests
//!
//! Fake process runners, project fixtures and assertions shared between the
//! unit tests and the integration tests under `tests/`.

#[cfg(any(test, debug_assertions))]
pub mod mocks;

#[cfg(any(test, debug_assertions))]
pub mod fixtures;

#[cfg(any(test, debug_assertions))]
pub mod assertions;
