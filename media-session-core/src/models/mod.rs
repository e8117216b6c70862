pub mod config;
pub mod device;
pub mod effect;
pub mod error;
pub mod state;
