pub mod cli;
pub mod config;
pub mod logging;

pub use self::{cli::Cli, config::Config};
