// Rendering of lexer and parser diagnostics using ariadne

use crate::common::span::Span;
use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use chumsky::error::Rich;
use std::fmt;

/// Render a chumsky diagnostic as plain text, source excerpt included
pub fn render_syntax_error<T: fmt::Display>(source: &str, error: &Rich<'_, T, Span>) -> String {
    let span = error.span();
    let report = Report::build(ReportKind::Error, span.start..span.end)
        .with_config(Config::default().with_color(false))
        .with_message("syntax error")
        .with_label(
            Label::new(span.start..span.end)
                .with_message(error.to_string())
                .with_color(Color::Red),
        )
        .finish();

    let mut out = Vec::new();
    match report.write(Source::from(source), &mut out) {
        Ok(()) => String::from_utf8_lossy(&out).into_owned(),
        // Fall back to the bare message
        Err(_) => error.to_string(),
    }
}
