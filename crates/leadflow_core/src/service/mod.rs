//! Use-case services exposed to front ends.
//!
//! # Responsibility
//! - Provide stable entry points over board state and persistence.
//! - Keep front ends storage-agnostic.

pub mod board_service;
