//! API module for HTTP handlers, middleware, and DTOs.
//!
//! The HTTP layer of the application: request handlers, middleware
//! components, and data transfer objects.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
