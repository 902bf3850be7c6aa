//! Core domain types
//!
//! Fundamental value objects and errors used across the domain.

pub mod error;
pub mod expression;
pub mod model;
