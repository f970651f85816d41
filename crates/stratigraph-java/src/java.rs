//! Java line recognition.

use crate::extractor::{SourceExtractor, SourceLine};

/// Recognises `package` and `import` lines of Java source.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaExtractor;

impl JavaExtractor {
    /// Creates a new Java extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Text after `keyword` if the line starts with it followed by whitespace.
    fn after_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
        line.strip_prefix(keyword)
            .filter(|rest| rest.starts_with(char::is_whitespace))
            .map(str::trim_start)
    }

    /// Statement body up to the terminating `;`.
    fn statement_body(rest: &str) -> Option<String> {
        let body = rest.split(';').next().unwrap_or_default().trim();
        (!body.is_empty()).then(|| body.to_owned())
    }
}

impl SourceExtractor for JavaExtractor {
    fn language_id(&self) -> &'static str {
        "java"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["java"]
    }

    fn nested_source_root(&self) -> &'static str {
        "main/java"
    }

    fn classify(&self, line: &str) -> SourceLine {
        if let Some(rest) = Self::after_keyword(line, "package") {
            return Self::statement_body(rest).map_or(SourceLine::Other, SourceLine::Declaration);
        }

        if let Some(rest) = Self::after_keyword(line, "import") {
            let rest = Self::after_keyword(rest, "static").unwrap_or(rest);
            return Self::statement_body(rest).map_or(SourceLine::Other, SourceLine::Import);
        }

        SourceLine::Other
    }
}
