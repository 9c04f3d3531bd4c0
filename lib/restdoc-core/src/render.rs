//! Markdown rendering and file export for a recorded document.

use std::fs;
use std::path::Path;

use pulldown_cmark::{Options, Parser, html};
use tracing::info;

use crate::markdown::MarkdownBuilder;
use crate::recorder::{ApiDoc, ApiDocError};

impl ApiDoc {
    /// Renders the document as Markdown.
    ///
    /// The output is the document title and description, then each domain in
    /// insertion order with its calls in call order. Every call renders its
    /// method as a level-3 heading, the call description, a `Request` code
    /// block with `METHOD URL` (and the request body text when non-empty),
    /// and a `Response` code block with the status code and body.
    #[must_use]
    pub fn render(&self) -> String {
        let mut builder = MarkdownBuilder::new();

        builder.h1(&self.title).body(&self.description);

        for domain in self.domains.values() {
            builder.h2(&domain.name).body(&domain.description);

            for call in &domain.calls {
                let mut request = format!("{} {}", call.method, call.url);
                if !call.request_body.is_empty() {
                    request.push_str("\n\n");
                    request.push_str(&call.request_body);
                }
                let response =
                    format!("Code: {}\n\nBody: {}", call.response_code, call.response_body);

                builder
                    .h3(&call.method)
                    .body(&call.description)
                    .h4("Request")
                    .code(&request)
                    .h4("Response")
                    .code(&response);
            }
        }

        builder.build()
    }

    /// Renders the document and writes it to the configured Markdown file
    /// name, creating parent directories and truncating an existing file.
    pub fn write_markdown_file(&self) -> Result<(), ApiDocError> {
        let markdown = self.render();
        write_file(self.markdown_file_name.as_ref(), &markdown)
    }

    /// Renders the document, converts it to HTML, and writes it to the
    /// configured HTML file name.
    ///
    /// The conversion enables the common Markdown extensions (tables,
    /// footnotes, strikethrough, task lists).
    pub fn write_html_file(&self) -> Result<(), ApiDocError> {
        let markdown = self.render();

        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS;
        let parser = Parser::new_ext(&markdown, options);
        let mut output = String::new();
        html::push_html(&mut output, parser);

        write_file(self.html_file_name.as_ref(), &output)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), ApiDocError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    info!(path = %path.display(), "documentation written");
    Ok(())
}
