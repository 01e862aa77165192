//! Typed client for the idea box REST API.

pub mod client;
pub mod ideas;
pub mod org;
pub mod users;

pub use client::{Acknowledgement, ApiClient};
