mod config;
pub use config::ServerConfig;

mod extract;
pub mod flash;
pub mod forms;

mod http_layers;
pub use http_layers::*;

pub mod metrics;
pub mod pages;

#[allow(clippy::module_inception)]
mod server;
pub use server::{make_app, run_server};

pub mod state;
