use std::fmt;
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

/// Termination info of a finished child, rendered the way the `status`
/// built-in and the background reaper report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Exited(i32),
    Signaled(i32),
}

impl Default for CommandStatus {
    fn default() -> Self {
        CommandStatus::Exited(0)
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandStatus::Exited(code) => write!(f, "exit value {}", code),
            CommandStatus::Signaled(sig) => write!(f, "terminated by signal {}", sig),
        }
    }
}

impl From<ExitStatus> for CommandStatus {
    fn from(status: ExitStatus) -> Self {
        match status.signal() {
            Some(sig) => CommandStatus::Signaled(sig),
            None => CommandStatus::Exited(status.code().unwrap_or(0)),
        }
    }
}

/// Shell-lifetime state mutated by the dispatcher and the launcher.
#[derive(Debug, Default)]
pub struct ShellState {
    last_status: CommandStatus,
}

impl ShellState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_status(&self) -> CommandStatus {
        self.last_status
    }

    pub fn set_last_status(&mut self, status: CommandStatus) {
        self.last_status = status;
    }
}
