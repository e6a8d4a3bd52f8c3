//! HTTP layer: route handlers over the shared dashboard state

pub mod handlers;
