use std::env;
use std::path::PathBuf;

use super::{Builtin, BuiltinContext, BuiltinError};
use crate::core::command::Command;

#[derive(Clone)]
pub struct CdCommand;

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self
    }

    fn home_dir() -> Result<PathBuf, BuiltinError> {
        env::var_os("HOME")
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .ok_or_else(|| BuiltinError::ChangeDirectory("HOME is not set".to_string()))
    }
}

impl Builtin for CdCommand {
    /// No argument, `~`, or the literal text `$HOME` all go to the home
    /// directory; anything else is taken as a path. Extra arguments are
    /// ignored.
    fn execute(&self, command: &Command, _ctx: &mut BuiltinContext) -> Result<(), BuiltinError> {
        let target = match command.arguments.first().map(String::as_str) {
            None | Some("~") | Some("$HOME") => Self::home_dir()?,
            Some(path) => PathBuf::from(path),
        };

        env::set_current_dir(&target)
            .map_err(|e| BuiltinError::ChangeDirectory(format!("{}: {}", target.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::ShellState;
    use crate::process::jobs::JobTable;

    // One test body so the process-global working directory is not fought
    // over by parallel tests.
    #[test]
    fn test_cd_targets() {
        let cmd = CdCommand::new();
        let mut state = ShellState::new();
        let mut jobs = JobTable::new();
        let mut ctx = BuiltinContext {
            state: &mut state,
            jobs: &mut jobs,
        };

        let home = env::var("HOME").unwrap();

        let no_args = Command::parse("cd", false).unwrap();
        cmd.execute(&no_args, &mut ctx).unwrap();
        assert_eq!(env::current_dir().unwrap(), PathBuf::from(&home));

        let to_tmp = Command::parse("cd /tmp ignored extra", false).unwrap();
        cmd.execute(&to_tmp, &mut ctx).unwrap();
        assert_eq!(env::current_dir().unwrap(), PathBuf::from("/tmp"));

        let tilde = Command::parse("cd ~", false).unwrap();
        cmd.execute(&tilde, &mut ctx).unwrap();
        assert_eq!(env::current_dir().unwrap(), PathBuf::from(&home));

        let home_literal = Command::parse("cd $HOME", false).unwrap();
        cmd.execute(&home_literal, &mut ctx).unwrap();
        assert_eq!(env::current_dir().unwrap(), PathBuf::from(&home));

        let missing = Command::parse("cd /no/such/directory", false).unwrap();
        assert!(cmd.execute(&missing, &mut ctx).is_err());
        // A failed cd leaves the shell where it was.
        assert_eq!(env::current_dir().unwrap(), PathBuf::from(&home));
    }
}
