//! Command-line arguments.

use std::fmt;
use std::path::PathBuf;

use mly_diagnostic::emitter::ColorMode;

/// What to do with each file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the syntax tree.
    Parse,
    /// Only report diagnostics.
    Check,
    /// Print leaves and trivia in source order.
    Tokens,
}

impl Command {
    pub fn from_name(name: &str) -> Option<Command> {
        match name {
            "parse" => Some(Command::Parse),
            "check" => Some(Command::Check),
            "tokens" => Some(Command::Tokens),
            _ => None,
        }
    }
}

/// `--format=`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// S-expression of the named nodes.
    #[default]
    Sexp,
    /// Indented dump with spans and leaf text.
    Tree,
    /// Diagnostics as JSON on stdout; no tree output.
    Json,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<OutputFormat> {
        match name {
            "sexp" => Some(OutputFormat::Sexp),
            "tree" => Some(OutputFormat::Tree),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliConfig {
    pub command: Command,
    pub files: Vec<PathBuf>,
    pub format: OutputFormat,
    pub color: ColorMode,
    /// Stop at the first error instead of recovering.
    pub strict: bool,
}

impl CliConfig {
    pub fn new(command: Command) -> Self {
        CliConfig {
            command,
            files: Vec::new(),
            format: OutputFormat::default(),
            color: ColorMode::default(),
            strict: false,
        }
    }
}

/// Why the command line was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UsageError {
    /// No arguments, or `help`.
    Help,
    UnknownCommand(String),
    UnknownOption(String),
    InvalidValue { option: &'static str, value: String },
    NoFiles(Command),
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageError::Help => write!(f, "no command given"),
            UsageError::UnknownCommand(name) => write!(f, "unknown command '{name}'"),
            UsageError::UnknownOption(arg) => write!(f, "unknown option '{arg}'"),
            UsageError::InvalidValue { option, value } => {
                write!(f, "invalid value '{value}' for --{option}")
            }
            UsageError::NoFiles(_) => write!(f, "missing file path"),
        }
    }
}

/// Parse the arguments after the program name.
///
/// Options may appear anywhere after the command; `--` ends option
/// processing.
pub fn parse_args(args: &[String]) -> Result<CliConfig, UsageError> {
    let Some(first) = args.first() else {
        return Err(UsageError::Help);
    };
    if matches!(first.as_str(), "help" | "--help" | "-h") {
        return Err(UsageError::Help);
    }
    let command =
        Command::from_name(first).ok_or_else(|| UsageError::UnknownCommand(first.clone()))?;
    let mut config = CliConfig::new(command);

    let mut options_done = false;
    for arg in &args[1..] {
        if options_done || !arg.starts_with('-') {
            config.files.push(PathBuf::from(arg));
        } else if arg == "--" {
            options_done = true;
        } else if arg == "--strict" {
            config.strict = true;
        } else if let Some(value) = arg.strip_prefix("--format=") {
            config.format = OutputFormat::from_name(value).ok_or_else(|| {
                UsageError::InvalidValue {
                    option: "format",
                    value: value.to_string(),
                }
            })?;
        } else if let Some(value) = arg.strip_prefix("--color=") {
            config.color = ColorMode::from_name(value).ok_or_else(|| UsageError::InvalidValue {
                option: "color",
                value: value.to_string(),
            })?;
        } else {
            return Err(UsageError::UnknownOption(arg.clone()));
        }
    }

    if config.files.is_empty() {
        return Err(UsageError::NoFiles(command));
    }
    Ok(config)
}
