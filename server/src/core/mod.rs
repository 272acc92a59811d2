//! Core subsystem. Application state, request gates, and shared infrastructure.

pub mod app;
pub mod extract;
pub mod route_auth;
pub mod session;
pub mod worker;

pub use crate::core::extract::Auth;

// vim: ts=4
