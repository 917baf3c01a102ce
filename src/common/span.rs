use chumsky::span::SimpleSpan;

pub type Span = SimpleSpan<usize>;
pub type Spanned<T> = (T, Span);

/// Build a span from byte offsets
pub fn span(start: usize, end: usize) -> Span {
    Span::from(start..end)
}

/// 1-based (line, column) of a byte offset in `source`
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for (i, c) in source.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}
