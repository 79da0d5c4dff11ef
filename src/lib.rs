pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod mediator;
pub mod requests;
pub mod store;

#[cfg(test)]
pub mod testing;
