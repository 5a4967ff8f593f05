pub mod config;
pub mod error;
pub mod extract;
pub mod processor;
pub mod routes;
pub mod state;
pub mod translate;
pub mod upload;
pub mod validate;
