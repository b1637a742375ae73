use std::fmt;

pub mod jobs;
pub mod launcher;
pub mod signal;

#[derive(Debug)]
pub enum ProcessError {
    /// The spawn primitive itself failed; fatal to the shell.
    Spawn(std::io::Error),
    Wait(std::io::Error),
    Signal(String),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Spawn(e) => write!(f, "failed to spawn process: {}", e),
            ProcessError::Wait(e) => write!(f, "failed to wait for child: {}", e),
            ProcessError::Signal(msg) => write!(f, "signal error: {}", msg),
        }
    }
}

impl std::error::Error for ProcessError {}
