//! Foundation types for PANO.
//!
//! This crate contains the platform-agnostic core types shared by all PANO
//! crates: input events, the logical scroll-action mapping, event-handling
//! outcomes, engine configuration, and error types.

pub mod config;
pub mod error;
pub mod input;
