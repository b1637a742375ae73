use super::{Builtin, BuiltinContext, BuiltinError};
use crate::core::command::Command;

#[derive(Clone)]
pub struct StatusCommand;

impl Default for StatusCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Builtin for StatusCommand {
    /// Reports the last foreground command's termination; `exit value 0`
    /// before any foreground command has run.
    fn execute(&self, _command: &Command, ctx: &mut BuiltinContext) -> Result<(), BuiltinError> {
        println!("{}", ctx.state.last_status());
        Ok(())
    }
}
