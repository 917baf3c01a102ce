// Pretty error reporting with source highlighting using ariadne

use crate::common::span::line_col;
use crate::frontend::check::CheckError;
use ariadne::{Color, Label, Report, ReportKind, Source};
use std::io;
use std::ops::Range;

/// Report a naming error with source highlighting
pub fn report_check_error(filename: &str, source: &str, error: &CheckError) -> io::Result<()> {
    build_report(error).eprint(Source::from(source))?;

    let (line, column) = line_col(source, error.span().start);
    eprintln!("  --> {filename}:{line}:{column}");
    Ok(())
}

/// Build an ariadne Report from a CheckError
fn build_report(error: &CheckError) -> Report<'static, Range<usize>> {
    let span = error.span();
    let builder = Report::build(ReportKind::Error, span.start..span.end)
        .with_code(error.code())
        .with_message(error.to_string());

    match error {
        CheckError::UndeclaredVariable { .. } => builder
            .with_label(
                Label::new(span.start..span.end)
                    .with_message("not found in this scope")
                    .with_color(Color::Red),
            )
            .with_help("Make sure the variable is declared before use")
            .finish(),

        CheckError::DuplicateDeclaration { previous, .. } => builder
            .with_label(
                Label::new(span.start..span.end)
                    .with_message("declared again here")
                    .with_color(Color::Red),
            )
            .with_label(
                Label::new(previous.start..previous.end)
                    .with_message("first declared here")
                    .with_color(Color::Blue),
            )
            .finish(),

        CheckError::UndeclaredFunction { .. } => builder
            .with_label(
                Label::new(span.start..span.end)
                    .with_message("no such function")
                    .with_color(Color::Red),
            )
            .with_help("Declare the function, or a prototype for it, before the call")
            .finish(),
    }
}
