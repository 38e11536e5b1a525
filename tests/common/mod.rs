//! Common test utilities for visplot.
//!
//! This module provides shared utilities for testing the figure
//! renderers end-to-end.

// Re-export all common test utilities
pub mod image_utils;
pub mod sample_data;
