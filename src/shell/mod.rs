// Composition root for the bookshop.
//
// Responsibilities
// - Wire concrete stores into the cart and catalog services.
// - Authenticate callers and map service errors onto HTTP responses.
// - Run the cart expiry sweeper next to the HTTP server.

pub mod auth;
pub mod errors;
pub mod http;
pub mod state;
pub mod workers;
