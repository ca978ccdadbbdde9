pub mod api_docs;
pub mod app;
pub mod blockchain;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod roster;
pub mod routes;
pub mod session;
pub mod state;
pub mod utils;
