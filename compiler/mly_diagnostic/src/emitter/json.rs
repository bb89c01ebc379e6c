//! JSON Emitter
//!
//! Machine-readable diagnostic output: one JSON array per run.

use std::io::Write;

use crate::Diagnostic;

use super::{escape_json, trailing_comma, DiagnosticEmitter, SourceFile};

/// JSON emitter for machine-readable output.
pub struct JsonEmitter<'s, W: Write> {
    writer: W,
    first: bool,
    file: Option<SourceFile<'s>>,
}

impl<'s, W: Write> JsonEmitter<'s, W> {
    pub fn new(writer: W) -> Self {
        JsonEmitter {
            writer,
            first: true,
            file: None,
        }
    }

    /// Attach the file the diagnostics refer to; adds `file`, `line` and
    /// `column` fields to every label.
    #[must_use]
    pub fn with_source(mut self, file: SourceFile<'s>) -> Self {
        self.file = Some(file);
        self
    }

    /// Begin the JSON array output.
    pub fn begin(&mut self) {
        let _ = writeln!(self.writer, "[");
    }

    /// End the JSON array output.
    pub fn end(&mut self) {
        if self.first {
            let _ = writeln!(self.writer, "]");
        } else {
            let _ = writeln!(self.writer, "\n]");
        }
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        if !self.first {
            let _ = writeln!(self.writer, ",");
        }
        self.first = false;

        let _ = writeln!(self.writer, "  {{");
        let _ = writeln!(
            self.writer,
            "    \"code\": \"{}\",",
            diagnostic.code.as_str()
        );
        let _ = writeln!(self.writer, "    \"severity\": \"error\",");
        let _ = writeln!(
            self.writer,
            "    \"message\": \"{}\",",
            escape_json(&diagnostic.message)
        );

        let _ = writeln!(self.writer, "    \"labels\": [");
        for (i, label) in diagnostic.labels.iter().enumerate() {
            let comma = trailing_comma(i, diagnostic.labels.len());
            let _ = writeln!(self.writer, "      {{");
            let _ = writeln!(self.writer, "        \"start\": {},", label.span.start);
            let _ = writeln!(self.writer, "        \"end\": {},", label.span.end);
            if let Some(file) = &self.file {
                let (line, col) = file.line_col(label.span.start);
                let _ = writeln!(
                    self.writer,
                    "        \"file\": \"{}\",",
                    escape_json(file.path)
                );
                let _ = writeln!(self.writer, "        \"line\": {line},");
                let _ = writeln!(self.writer, "        \"column\": {col},");
            }
            let _ = writeln!(
                self.writer,
                "        \"message\": \"{}\",",
                escape_json(&label.message)
            );
            let _ = writeln!(self.writer, "        \"primary\": {}", label.is_primary);
            let _ = writeln!(self.writer, "      }}{comma}");
        }
        let _ = writeln!(self.writer, "    ],");

        let _ = writeln!(self.writer, "    \"notes\": [");
        for (i, note) in diagnostic.notes.iter().enumerate() {
            let comma = trailing_comma(i, diagnostic.notes.len());
            let _ = writeln!(self.writer, "      \"{}\"{comma}", escape_json(note));
        }
        let _ = writeln!(self.writer, "    ],");

        let _ = writeln!(self.writer, "    \"suggestions\": [");
        for (i, suggestion) in diagnostic.suggestions.iter().enumerate() {
            let comma = trailing_comma(i, diagnostic.suggestions.len());
            let _ = writeln!(self.writer, "      \"{}\"{comma}", escape_json(suggestion));
        }
        let _ = writeln!(self.writer, "    ]");

        let _ = write!(self.writer, "  }}");
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, _error_count: usize) {
        // The array itself is the summary.
    }
}
