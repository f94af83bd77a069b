//! Common test utilities for dem-upsample.
//!
//! This module provides shared utilities for the integration tests.

pub mod assertions;
pub mod test_data;
