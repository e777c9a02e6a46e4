//! Filter operations
//!
//! This module provides 2D correlation and the blurs built on top of it.

/// Filter kernels
pub mod kernels;

/// Filter operations
mod ops;
pub use ops::*;
