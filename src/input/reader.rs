use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::error::ShellError;

/// Thin wrapper over rustyline: yields complete lines, `None` at end of
/// input. Ctrl-C at the prompt is swallowed, matching the shell's no-op
/// interrupt disposition.
pub struct LineReader {
    editor: DefaultEditor,
}

impl LineReader {
    pub fn new() -> Result<Self, ShellError> {
        Ok(LineReader {
            editor: DefaultEditor::new()?,
        })
    }

    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError> {
        loop {
            match self.editor.readline(prompt) {
                Ok(line) => return Ok(Some(line)),
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => return Ok(None),
                Err(e) => return Err(ShellError::Readline(e)),
            }
        }
    }
}
