pub mod config;
pub mod export;
pub mod help;
pub mod read;
pub mod result;

pub use result::CommandResult;
