//! Utility functions for Glaive.

pub mod simd;
