pub mod builtins;
pub mod command;
pub mod expand;
pub mod state;
