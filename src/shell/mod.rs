use std::process;
use std::sync::Arc;

use crate::core::builtins::{BuiltinContext, BuiltinSet};
use crate::core::command::Command;
use crate::core::expand::expand_pid;
use crate::core::state::ShellState;
use crate::error::ShellError;
use crate::input::LineReader;
use crate::process::jobs::JobTable;
use crate::process::launcher::Launcher;
use crate::process::signal::SignalState;
use crate::process::ProcessError;

const PROMPT: &str = ": ";

pub struct Shell {
    reader: LineReader,
    state: ShellState,
    jobs: JobTable,
    builtins: BuiltinSet,
    launcher: Launcher,
    signals: Arc<SignalState>,
    pid: u32,
}

impl Shell {
    pub fn new() -> Result<Self, ShellError> {
        let signals = Arc::new(SignalState::new());
        SignalState::install(Arc::clone(&signals))?;

        // The shell itself shrugs off Ctrl-C; only foreground children
        // die to it.
        ctrlc::set_handler(|| {})?;

        Ok(Shell {
            reader: LineReader::new()?,
            state: ShellState::new(),
            jobs: JobTable::new(),
            builtins: BuiltinSet::new(),
            launcher: Launcher::new(Arc::clone(&signals)),
            signals,
            pid: process::id(),
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        loop {
            // Collect finished background jobs before every prompt.
            self.jobs.reap();

            let line = match self.reader.read_line(PROMPT)? {
                Some(line) => line,
                None => break,
            };

            // Blank lines and comments never reach the parser.
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            if let Err(e) = self.eval(&line) {
                if matches!(e, ShellError::Process(ProcessError::Spawn(_))) {
                    return Err(e);
                }
                eprintln!("{}", e);
            }
        }

        // End of input tears the shell down the way `exit` would.
        self.jobs.kill_all();
        Ok(())
    }

    fn eval(&mut self, line: &str) -> Result<(), ShellError> {
        let expanded = expand_pid(line, self.pid);
        let command = Command::parse(&expanded, self.signals.foreground_only())?;

        let mut ctx = BuiltinContext {
            state: &mut self.state,
            jobs: &mut self.jobs,
        };
        if let Some(result) = self.builtins.dispatch(&command, &mut ctx) {
            result?;
            return Ok(());
        }

        self.launcher
            .launch(&command, &mut self.state, &mut self.jobs)?;
        Ok(())
    }
}
