//! Shared HTTP patterns for the domain routers.

pub mod http;

pub use http::*;
