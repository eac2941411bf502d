//! HTTP Routes
//!
//! Route handlers organized by functionality.

pub mod assets;
pub mod dashboard;
pub mod datasets;
pub mod health;
