//! Canvas REST surface: payload models (data) and the typed client (behavior).
//!
//! `model` keeps raw payload fields alongside the typed ones so configurable key lookups
//! work across deployments; `client` owns endpoint selection, pagination, status
//! classification, and JSON decoding.

pub mod client;
pub mod model;

pub use client::*;
pub use model::*;
