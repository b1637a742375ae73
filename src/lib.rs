pub mod error;
pub mod shell;

pub mod core;
pub mod input;
pub mod process;
