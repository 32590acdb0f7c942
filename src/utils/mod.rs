//! Utility functions and helpers.

pub mod csv;
pub mod validation;
