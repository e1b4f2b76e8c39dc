//! API Routes
//!
//! Route handlers organized by functionality.

pub mod challenges;
pub mod comments;
pub mod health;
pub mod participations;
pub mod sessions;
pub mod views;
