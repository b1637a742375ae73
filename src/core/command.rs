use std::fmt;

/// Upper bound on the argument list; exceeding it is a parse error rather
/// than unbounded growth.
pub const MAX_ARGS: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    EmptyCommand,
    MissingRedirectTarget(char),
    TooManyArguments,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptyCommand => write!(f, "empty command"),
            ParseError::MissingRedirectTarget(op) => {
                write!(f, "missing file name after '{}'", op)
            }
            ParseError::TooManyArguments => {
                write!(f, "too many arguments (limit is {})", MAX_ARGS)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// One parsed instruction. Immutable once built; consumed by a single
/// dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub arguments: Vec<String>,
    pub input_redirect: Option<String>,
    pub output_redirect: Option<String>,
    pub background: bool,
}

impl Command {
    /// Splits an expanded line on whitespace and scans the clause tokens.
    /// `<` and `>` take the following token as a redirect target (last
    /// occurrence wins). A `&` as the final token requests background
    /// execution, which `foreground_only` mode downgrades to an accepted
    /// no-op; a `&` anywhere else is an inert marker, not an argument.
    pub fn parse(line: &str, foreground_only: bool) -> Result<Self, ParseError> {
        let mut tokens = line.split_whitespace().peekable();

        let name = tokens.next().ok_or(ParseError::EmptyCommand)?.to_string();
        let mut command = Command {
            name,
            arguments: Vec::new(),
            input_redirect: None,
            output_redirect: None,
            background: false,
        };

        while let Some(token) = tokens.next() {
            match token {
                "<" => {
                    let target = tokens
                        .next()
                        .ok_or(ParseError::MissingRedirectTarget('<'))?;
                    command.input_redirect = Some(target.to_string());
                }
                ">" => {
                    let target = tokens
                        .next()
                        .ok_or(ParseError::MissingRedirectTarget('>'))?;
                    command.output_redirect = Some(target.to_string());
                }
                "&" => {
                    if tokens.peek().is_none() && !foreground_only {
                        command.background = true;
                    }
                }
                _ => {
                    if command.arguments.len() == MAX_ARGS {
                        return Err(ParseError::TooManyArguments);
                    }
                    command.arguments.push(token.to_string());
                }
            }
        }

        Ok(command)
    }
}
