//! Common library for the VidTube backend
//!
//! This crate provides shared functionality used across the VidTube
//! services: PostgreSQL connection pooling, health checks, and the
//! shared database error types.

pub mod database;
pub mod error;
