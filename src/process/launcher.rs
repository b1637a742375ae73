use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::process::CommandExt;
use std::path::PathBuf;
use std::process::{Child, Command as SysCommand, Stdio};
use std::sync::Arc;

use super::jobs::JobTable;
use super::signal::SignalState;
use super::ProcessError;
use crate::core::command::Command;
use crate::core::state::{CommandStatus, ShellState};

/// Where external commands live. There is no PATH search; a name resolves
/// to exactly one candidate under this directory.
const DEFAULT_BIN_DIR: &str = "/bin";

struct RedirectedStdio {
    stdin: Option<Stdio>,
    stdout: Option<Stdio>,
}

/// Spawns external commands with redirection and foreground/background
/// scheduling. One routine covers every combination of the command's
/// optional fields.
pub struct Launcher {
    bin_dir: PathBuf,
    signals: Arc<SignalState>,
}

impl Launcher {
    pub fn new(signals: Arc<SignalState>) -> Self {
        Self::with_bin_dir(DEFAULT_BIN_DIR, signals)
    }

    pub fn with_bin_dir(bin_dir: impl Into<PathBuf>, signals: Arc<SignalState>) -> Self {
        Launcher {
            bin_dir: bin_dir.into(),
            signals,
        }
    }

    /// Runs a non-built-in command: open redirects, spawn, then either
    /// block for a foreground child or register a background one.
    ///
    /// Redirect-open and exec failures are recorded as `exit value 1` and
    /// are not errors to the caller; only a failing spawn primitive is.
    pub fn launch(
        &self,
        command: &Command,
        state: &mut ShellState,
        jobs: &mut JobTable,
    ) -> Result<(), ProcessError> {
        let stdio = match self.open_redirects(command) {
            Ok(stdio) => stdio,
            Err(status) => {
                // Only a foreground failure lands in `status`; that slot
                // holds foreground termination info exclusively.
                if !command.background {
                    state.set_last_status(status);
                }
                return Ok(());
            }
        };

        let program = self.bin_dir.join(&command.name);
        let mut sys = SysCommand::new(&program);
        sys.args(&command.arguments);
        if let Some(stdin) = stdio.stdin {
            sys.stdin(stdin);
        }
        if let Some(stdout) = stdio.stdout {
            sys.stdout(stdout);
        }

        // Child-side signal dispositions, applied between fork and exec:
        // a foreground child dies to SIGINT, a background child ignores
        // it, and no child ever sees the shell's SIGTSTP toggle.
        let background = command.background;
        unsafe {
            sys.pre_exec(move || {
                if background {
                    libc::signal(libc::SIGINT, libc::SIG_IGN);
                } else {
                    libc::signal(libc::SIGINT, libc::SIG_DFL);
                }
                libc::signal(libc::SIGTSTP, libc::SIG_IGN);
                Ok(())
            });
        }

        let child = match sys.spawn() {
            Ok(child) => child,
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::PermissionDenied) => {
                // What perror would say in the child after a failed exec.
                eprintln!("{}: {}", command.name, e);
                state.set_last_status(CommandStatus::Exited(1));
                return Ok(());
            }
            Err(e) => return Err(ProcessError::Spawn(e)),
        };

        if background {
            println!("background pid is {}", child.id());
            // A full table silently drops tracking; the job still runs.
            let _ = jobs.insert(child);
            Ok(())
        } else {
            self.wait_foreground(child, state)
        }
    }

    /// Blocks until the foreground child terminates. The published pid is
    /// the single point of coordination with the SIGTSTP handler.
    fn wait_foreground(&self, mut child: Child, state: &mut ShellState) -> Result<(), ProcessError> {
        self.signals.set_foreground(child.id());
        let result = child.wait();
        self.signals.clear_foreground();

        match result {
            Ok(status) => {
                let status = CommandStatus::from(status);
                if let CommandStatus::Signaled(sig) = status {
                    println!("terminated by signal {}", sig);
                }
                state.set_last_status(status);
                self.signals.take_pending_notice();
                Ok(())
            }
            Err(e) => {
                self.signals.take_pending_notice();
                Err(ProcessError::Wait(e))
            }
        }
    }

    /// Opens redirect targets relative to the current directory. An open
    /// failure reports `cannot open ...` and yields the exit-1 status the
    /// child would have produced before exec.
    fn open_redirects(&self, command: &Command) -> Result<RedirectedStdio, CommandStatus> {
        let mut stdio = RedirectedStdio {
            stdin: None,
            stdout: None,
        };

        if let Some(path) = &command.input_redirect {
            match File::open(path) {
                Ok(file) => stdio.stdin = Some(Stdio::from(file)),
                Err(_) => {
                    println!("cannot open {} for input", path);
                    return Err(CommandStatus::Exited(1));
                }
            }
        }

        if let Some(path) = &command.output_redirect {
            let opened = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o777)
                .open(path);
            match opened {
                Ok(file) => stdio.stdout = Some(Stdio::from(file)),
                Err(_) => {
                    println!("cannot open {} for output", path);
                    return Err(CommandStatus::Exited(1));
                }
            }
        }

        // A background job with exactly one stream redirected must not hold
        // the terminal on the other: that one goes to the null device.
        if command.background {
            match (&stdio.stdin, &stdio.stdout) {
                (Some(_), None) => stdio.stdout = Some(Stdio::null()),
                (None, Some(_)) => stdio.stdin = Some(Stdio::null()),
                _ => {}
            }
        }

        Ok(stdio)
    }
}
