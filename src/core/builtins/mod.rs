use std::collections::BTreeMap;
use std::fmt;

mod cd;
mod exit;
mod status;

pub use cd::CdCommand;
pub use exit::ExitCommand;
pub use status::StatusCommand;

use crate::core::command::Command;
use crate::core::state::ShellState;
use crate::process::jobs::JobTable;

#[derive(Debug)]
pub enum BuiltinError {
    ChangeDirectory(String),
}

impl fmt::Display for BuiltinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuiltinError::ChangeDirectory(msg) => write!(f, "cd: {}", msg),
        }
    }
}

impl std::error::Error for BuiltinError {}

/// Shell-side state a built-in is allowed to touch.
pub struct BuiltinContext<'a> {
    pub state: &'a mut ShellState,
    pub jobs: &'a mut JobTable,
}

/// A command handled inside the shell process, never forked. Built-ins
/// ignore the redirect and background fields of the parsed command.
pub trait Builtin {
    fn execute(&self, command: &Command, ctx: &mut BuiltinContext) -> Result<(), BuiltinError>;
}

enum BuiltinKind {
    Cd(CdCommand),
    Exit(ExitCommand),
    Status(StatusCommand),
}

impl Builtin for BuiltinKind {
    fn execute(&self, command: &Command, ctx: &mut BuiltinContext) -> Result<(), BuiltinError> {
        match self {
            BuiltinKind::Cd(cmd) => cmd.execute(command, ctx),
            BuiltinKind::Exit(cmd) => cmd.execute(command, ctx),
            BuiltinKind::Status(cmd) => cmd.execute(command, ctx),
        }
    }
}

pub struct BuiltinSet {
    commands: BTreeMap<String, BuiltinKind>,
}

impl Default for BuiltinSet {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinSet {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("cd".to_string(), BuiltinKind::Cd(CdCommand::new()));
        commands.insert("exit".to_string(), BuiltinKind::Exit(ExitCommand::new()));
        commands.insert(
            "status".to_string(),
            BuiltinKind::Status(StatusCommand::new()),
        );
        BuiltinSet { commands }
    }

    /// Runs the built-in matching the command name, if any. `None` means
    /// the command is external and goes to the launcher.
    pub fn dispatch(
        &self,
        command: &Command,
        ctx: &mut BuiltinContext,
    ) -> Option<Result<(), BuiltinError>> {
        self.commands
            .get(&command.name)
            .map(|builtin| builtin.execute(command, ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        Command::parse(line, false).unwrap()
    }

    #[test]
    fn test_builtin_registry_contents() {
        let set = BuiltinSet::new();
        for name in ["cd", "exit", "status"] {
            assert!(set.commands.contains_key(name));
        }
        assert!(!set.commands.contains_key("ls"));
        assert!(!set.commands.contains_key(""));
    }

    #[test]
    fn test_dispatch_skips_external_commands() {
        let set = BuiltinSet::new();
        let mut state = ShellState::new();
        let mut jobs = JobTable::new();
        let mut ctx = BuiltinContext {
            state: &mut state,
            jobs: &mut jobs,
        };
        assert!(set.dispatch(&parse("echo hello"), &mut ctx).is_none());
    }

    #[test]
    fn test_dispatch_status_never_fails() {
        let set = BuiltinSet::new();
        let mut state = ShellState::new();
        let mut jobs = JobTable::new();
        let mut ctx = BuiltinContext {
            state: &mut state,
            jobs: &mut jobs,
        };
        // Redirects and the background flag are ignored on built-ins.
        let result = set.dispatch(&parse("status > out.txt &"), &mut ctx);
        assert!(matches!(result, Some(Ok(()))));
    }
}
