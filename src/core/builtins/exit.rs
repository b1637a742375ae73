use super::{Builtin, BuiltinContext, BuiltinError};
use crate::core::command::Command;

#[derive(Clone)]
pub struct ExitCommand;

impl Default for ExitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Builtin for ExitCommand {
    /// Kills every tracked background job, then ends the shell process.
    fn execute(&self, _command: &Command, ctx: &mut BuiltinContext) -> Result<(), BuiltinError> {
        ctx.jobs.kill_all();
        std::process::exit(0);
    }
}
