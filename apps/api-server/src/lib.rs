//! # Blog API Server
//!
//! Actix-web application serving the `/posts` resource. The binary in
//! `main.rs` wires these modules together; tests mount the same routes over
//! an in-memory store.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod state;
pub mod telemetry;
