use std::fmt::Write;

/// Append-only Markdown text builder with a fluent interface.
///
/// Every method appends to the accumulated text and returns `&mut Self` so
/// calls can be chained. [`build`](Self::build) returns the accumulated text
/// verbatim; it is idempotent and never resets the builder.
///
/// No validation or escaping is performed: heading levels and text content
/// are passed through as-is, so text containing a triple-backtick sequence
/// will break out of a [`code`](Self::code) fence. This is a known
/// limitation, not something the builder tries to fix.
///
/// # Example
///
/// ```rust
/// use restdoc_core::MarkdownBuilder;
///
/// let mut builder = MarkdownBuilder::new();
/// let text = builder
///     .h1("My API")
///     .body("A short description.")
///     .code("GET /users")
///     .build();
/// assert!(text.starts_with("# My API\n"));
/// ```
#[derive(Debug, Default)]
pub struct MarkdownBuilder {
    text: String,
}

impl MarkdownBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a heading: `#` repeated `level` times, a space, the text, and
    /// a newline. Levels 1 through 4 are the ones used by the renderer.
    pub fn heading(&mut self, level: usize, text: &str) -> &mut Self {
        for _ in 0..level {
            self.text.push('#');
        }
        self.text.push(' ');
        self.text.push_str(text);
        self.text.push('\n');
        self
    }

    /// Appends a level-1 heading.
    pub fn h1(&mut self, text: &str) -> &mut Self {
        self.heading(1, text)
    }

    /// Appends a level-2 heading.
    pub fn h2(&mut self, text: &str) -> &mut Self {
        self.heading(2, text)
    }

    /// Appends a level-3 heading.
    pub fn h3(&mut self, text: &str) -> &mut Self {
        self.heading(3, text)
    }

    /// Appends a level-4 heading.
    pub fn h4(&mut self, text: &str) -> &mut Self {
        self.heading(4, text)
    }

    /// Appends a body paragraph: the text followed by a blank line.
    pub fn body(&mut self, text: &str) -> &mut Self {
        let _ = writeln!(self.text, "{text}\n");
        self
    }

    /// Appends a fenced code block wrapping the text, followed by a blank
    /// line.
    pub fn code(&mut self, text: &str) -> &mut Self {
        let _ = writeln!(self.text, "```\n{text}\n```\n");
        self
    }

    /// Returns the accumulated text. Callable multiple times; the builder
    /// keeps its state.
    #[must_use]
    pub fn build(&self) -> String {
        self.text.clone()
    }
}
