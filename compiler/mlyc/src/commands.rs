//! The `parse`, `check` and `tokens` commands.
//!
//! Each file is parsed on the rayon pool and rendered into a [`FileReport`];
//! reports are printed afterwards in argument order.

use std::fmt::Write as _;
use std::fs;
use std::io::{self, IsTerminal};

use mly_diagnostic::emitter::{
    ColorMode, DiagnosticEmitter, JsonEmitter, SourceFile, TerminalEmitter,
};
use mly_diagnostic::Diagnostic;
use mly_ir::{Span, SyntaxKind, SyntaxTree};
use mly_parse::{parse_with_options, ParseOptions, SyntaxError};
use rayon::prelude::*;
use tracing::debug;

use crate::config::{CliConfig, Command, OutputFormat};

/// Everything one file contributes to the output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileReport {
    pub path: String,
    pub stdout: String,
    pub stderr: String,
    pub error_count: usize,
}

impl FileReport {
    fn unreadable(path: String, err: &io::Error) -> Self {
        let stderr = format!("error: cannot read '{path}': {err}\n");
        FileReport {
            path,
            stderr,
            error_count: 1,
            ..FileReport::default()
        }
    }
}

/// Run the configured command over every file. Returns the exit code.
pub fn run(config: &CliConfig) -> i32 {
    let is_tty = io::stderr().is_terminal();

    let reports: Vec<FileReport> = config
        .files
        .par_iter()
        .map(|path| {
            let display = path.display().to_string();
            match fs::read_to_string(path) {
                Ok(source) => process_file(&display, &source, config, is_tty),
                Err(err) => FileReport::unreadable(display, &err),
            }
        })
        .collect();

    let mut errors = 0;
    for report in &reports {
        print!("{}", report.stdout);
        eprint!("{}", report.stderr);
        errors += report.error_count;
    }

    if errors > 0 && config.format != OutputFormat::Json {
        let mut emitter = TerminalEmitter::stderr(config.color, is_tty);
        emitter.emit_summary(errors);
        emitter.flush();
    }
    i32::from(errors > 0)
}

/// Parse one source and render its output.
///
/// A strict parse that failed has no tree worth printing, so only its
/// diagnostic is reported. With `--format=json` stdout carries one JSON
/// array of diagnostics per file.
#[tracing::instrument(level = "debug", skip_all, fields(path = %path))]
pub fn process_file(path: &str, source: &str, config: &CliConfig, is_tty: bool) -> FileReport {
    let options = if config.strict {
        ParseOptions::strict()
    } else {
        ParseOptions::default()
    };
    let output = parse_with_options(source, options);
    debug!(errors = output.errors.len(), "parsed");

    let mut stdout = String::new();
    let show_tree = !(config.strict && output.has_errors());
    match (config.command, config.format) {
        (_, OutputFormat::Json) => {}
        (Command::Parse, OutputFormat::Sexp) if show_tree => {
            stdout.push_str(&output.tree.to_sexp());
            stdout.push('\n');
        }
        (Command::Parse, OutputFormat::Tree) if show_tree => {
            stdout.push_str(&output.tree.root().dump());
        }
        (Command::Tokens, _) if show_tree => write_tokens(&mut stdout, &output.tree),
        (Command::Check, _) if !output.has_errors() => {
            let _ = writeln!(stdout, "{path}: ok");
        }
        _ => {}
    }

    let diagnostics: Vec<Diagnostic> = output
        .errors
        .iter()
        .map(SyntaxError::to_diagnostic)
        .collect();
    let file = SourceFile::new(path, source);
    let mut stderr = String::new();
    if config.format == OutputFormat::Json {
        stdout.push_str(&render_json(file, &diagnostics));
    } else if !diagnostics.is_empty() {
        stderr = render_terminal(file, &diagnostics, config.color, is_tty);
    }

    FileReport {
        path: path.to_string(),
        stdout,
        stderr,
        error_count: diagnostics.len(),
    }
}

/// One line per leaf or trivia piece: `start..end kind "text"`.
fn write_tokens(out: &mut String, tree: &SyntaxTree) {
    let mut pieces: Vec<(Span, SyntaxKind)> = tree
        .leaves()
        .map(|leaf| (leaf.span(), leaf.kind()))
        .chain(tree.trivia().iter().map(|t| (t.span, t.kind)))
        .collect();
    pieces.sort_by_key(|(span, _)| span.start);

    for (span, kind) in pieces {
        let _ = writeln!(
            out,
            "{}..{} {} {:?}",
            span.start,
            span.end,
            kind.name(),
            tree.text(span)
        );
    }
}

fn render_terminal(
    file: SourceFile<'_>,
    diagnostics: &[Diagnostic],
    color: ColorMode,
    is_tty: bool,
) -> String {
    let mut buffer = Vec::new();
    let mut emitter = TerminalEmitter::with_color_mode(&mut buffer, color, is_tty).with_source(file);
    emitter.emit_all(diagnostics);
    emitter.flush();
    String::from_utf8_lossy(&buffer).into_owned()
}

fn render_json(file: SourceFile<'_>, diagnostics: &[Diagnostic]) -> String {
    let mut buffer = Vec::new();
    let mut emitter = JsonEmitter::new(&mut buffer).with_source(file);
    emitter.begin();
    emitter.emit_all(diagnostics);
    emitter.end();
    emitter.flush();
    String::from_utf8_lossy(&buffer).into_owned()
}
