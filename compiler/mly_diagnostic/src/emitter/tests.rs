#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use mly_ir::Span;
use pretty_assertions::assert_eq;

use super::*;
use crate::ErrorCode;

fn sample_diagnostic() -> Diagnostic {
    Diagnostic::error(ErrorCode::E1002)
        .with_message("expected terminal, found `%%`")
        .with_label(Span::new(6, 6), "expected terminal")
        .with_secondary_label(Span::new(0, 6), "in this declaration")
        .with_note("`%token` needs at least one terminal")
}

fn render_terminal(diag: &Diagnostic, mode: ColorMode, file: Option<SourceFile<'_>>) -> String {
    let mut output = Vec::new();
    let mut emitter = TerminalEmitter::with_color_mode(&mut output, mode, false);
    if let Some(file) = file {
        emitter = emitter.with_source(file);
    }
    emitter.emit(diag);
    emitter.flush();
    String::from_utf8(output).unwrap()
}

#[test]
fn escape_json_specials() {
    assert_eq!(escape_json("plain"), "plain");
    assert_eq!(escape_json("\"q\""), "\\\"q\\\"");
    assert_eq!(escape_json("a\nb"), "a\\nb");
    assert_eq!(escape_json("a\\b"), "a\\\\b");
    assert_eq!(escape_json("\u{1}"), "\\u0001");
}

#[test]
fn trailing_commas() {
    assert_eq!(trailing_comma(0, 2), ",");
    assert_eq!(trailing_comma(1, 2), "");
}

#[test]
fn source_file_line_col() {
    let file = SourceFile::new("a.mly", "%token\n%%");
    assert_eq!(file.line_col(7), (2, 1));
}

// --- Terminal ---

#[test]
fn terminal_without_source_prints_spans() {
    let text = render_terminal(&sample_diagnostic(), ColorMode::Never, None);
    assert_eq!(
        text,
        "error[E1002]: expected terminal, found `%%`\n  \
         --> 6..6: expected terminal\n      \
         0..6: in this declaration\n  \
         = note: `%token` needs at least one terminal\n\n"
    );
}

#[test]
fn terminal_with_source_prints_locations_and_carets() {
    let source = "%token %% %%";
    let diag = Diagnostic::error(ErrorCode::E1002)
        .with_message("expected terminal")
        .with_label(Span::new(6, 6), "here");
    let text = render_terminal(
        &diag,
        ColorMode::Never,
        Some(SourceFile::new("g.mly", source)),
    );
    assert_eq!(
        text,
        "error[E1002]: expected terminal\n  \
         --> g.mly:1:7: here\n  \
         1 | %token %% %%\n  \
         \x20 |       ^\n\n"
    );
}

#[test]
fn terminal_colors_follow_mode() {
    let always = render_terminal(&sample_diagnostic(), ColorMode::Always, None);
    assert!(always.contains("\x1b["));
    let never = render_terminal(&sample_diagnostic(), ColorMode::Never, None);
    assert!(!never.contains("\x1b["));
    let auto = render_terminal(&sample_diagnostic(), ColorMode::Auto, None);
    assert!(!auto.contains("\x1b["));
}

#[test]
fn color_mode_resolution() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
    assert_eq!(ColorMode::default(), ColorMode::Auto);
    assert_eq!(ColorMode::from_name("always"), Some(ColorMode::Always));
    assert_eq!(ColorMode::from_name("sometimes"), None);
}

#[test]
fn terminal_summary() {
    let mut output = Vec::new();
    let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false);
    emitter.emit_summary(2);
    emitter.emit_summary(1);
    emitter.emit_summary(0);
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "error: aborting due to 2 previous errors\n\
         error: aborting due to previous error\n"
    );
}

// --- JSON ---

#[test]
fn json_array_of_diagnostics() {
    let mut output = Vec::new();
    let mut emitter = JsonEmitter::new(&mut output);
    emitter.begin();
    emitter.emit_all(&[
        Diagnostic::error(ErrorCode::E0001).with_message("one"),
        Diagnostic::error(ErrorCode::E1001).with_message("two"),
    ]);
    emitter.end();

    let text = String::from_utf8(output).unwrap();
    assert!(text.starts_with("[\n  {"));
    assert!(text.ends_with("  }\n]\n"));
    assert!(text.contains("\"code\": \"E0001\""));
    assert!(text.contains("\"message\": \"two\""));
    assert!(text.contains("  },\n  {"));
}

#[test]
fn json_empty_array() {
    let mut output = Vec::new();
    let mut emitter = JsonEmitter::new(&mut output);
    emitter.begin();
    emitter.end();
    assert_eq!(String::from_utf8(output).unwrap(), "[\n]\n");
}

#[test]
fn json_labels_with_source() {
    let mut output = Vec::new();
    let mut emitter =
        JsonEmitter::new(&mut output).with_source(SourceFile::new("g.mly", "%token\n%%"));
    emitter.emit(
        &Diagnostic::error(ErrorCode::E1002)
            .with_message("m")
            .with_label(Span::new(7, 9), "here"),
    );

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("\"severity\": \"error\""));
    assert!(text.contains("\"start\": 7"));
    assert!(text.contains("\"file\": \"g.mly\""));
    assert!(text.contains("\"line\": 2"));
    assert!(text.contains("\"column\": 1"));
    assert!(text.contains("\"primary\": true"));
}
