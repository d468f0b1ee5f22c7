//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate adapter calls into the RPC use cases.
//! - Classify adapter failures into caller-facing status codes.

pub mod blog_service;
pub mod status;
