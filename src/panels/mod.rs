//! Panel Models
//!
//! Local state and projections behind each dashboard panel, kept free of the
//! view layer.

pub mod assistant;
pub mod nutrition;
pub mod recipes;
pub mod shopping;
pub mod stock;
