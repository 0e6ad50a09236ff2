//! otnctl - operator CLI for OTN chassis inspection
//!
//! Command handlers write their output to any `std::io::Write`, so the binary
//! prints to stdout and the tests capture into a buffer.

pub mod alarm;
pub mod capability;
pub mod chassis;
pub mod context;
pub mod inventory;
pub mod show;
pub mod slot;

pub use context::CliContext;
pub use show::ShowCommands;
