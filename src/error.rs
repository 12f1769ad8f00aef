//! Error types for reading and parsing SVG documents

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Parse error at {span:?}: {message}")]
    Syntax { span: Span, message: String },
}

impl ParseError {
    /// Create a syntax error covering `span`
    pub fn syntax(span: Span, message: impl Into<String>) -> Self {
        Self::Syntax {
            span,
            message: message.into(),
        }
    }

    /// Byte range of the offending markup
    pub fn span(&self) -> &Span {
        match self {
            ParseError::Syntax { span, .. } => span,
        }
    }

    /// Human-readable reason, without position information
    pub fn message(&self) -> &str {
        match self {
            ParseError::Syntax { message, .. } => message,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let span = char_span(source, self.span());
        let mut buf = Vec::new();

        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(self.message())
            .with_label(
                Label::new((filename, span))
                    .with_message(self.message())
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

/// ariadne labels count characters, not bytes
fn char_span(source: &str, span: &Span) -> Span {
    let offset = |byte: usize| {
        source
            .char_indices()
            .take_while(|(i, _)| *i < byte.min(source.len()))
            .count()
    };
    let start = offset(span.start);
    let end = offset(span.end).max(start);
    start..end
}
