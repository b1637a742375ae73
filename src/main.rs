use smallsh::error::ShellError;
use smallsh::process::ProcessError;
use smallsh::shell::Shell;

fn main() {
    let mut shell = match Shell::new() {
        Ok(shell) => shell,
        Err(e) => {
            eprintln!("smallsh: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = shell.run() {
        eprintln!("smallsh: {}", e);
        let code = match e {
            ShellError::Process(ProcessError::Spawn(_)) => 2,
            _ => 1,
        };
        std::process::exit(code);
    }
}
