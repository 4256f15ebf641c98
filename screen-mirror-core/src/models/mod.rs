pub mod config;
pub mod consent;
pub mod display;
pub mod error;
pub mod snapshot;
pub mod state;
