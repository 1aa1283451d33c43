//! Markdown body copy.
//!
//! Two renderers share the [`MarkdownRenderer`] trait:
//!
//! - [`PandocRenderer`] pipes the Markdown through `pandoc -f markdown -t html`
//!   and reads the HTML back from stdout (the default).
//! - [`CmarkRenderer`] renders in process with `pulldown-cmark`.
//!
//! [`load_body_copy`] resolves the optional `--bodymarkdown` path into HTML.

use crate::tool::{Invocation, SystemRunner, ToolError, ToolRunner};
use pulldown_cmark::{Options, Parser, html as md_html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarkdownError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Markdown renderer failed: {0}")]
    Tool(#[from] ToolError),
    #[error("Markdown renderer produced invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub trait MarkdownRenderer {
    fn render(&self, markdown: &str) -> Result<String, MarkdownError>;
}

/// Renders through an external `pandoc` process.
pub struct PandocRenderer<R: ToolRunner = SystemRunner> {
    runner: R,
}

impl PandocRenderer<SystemRunner> {
    pub fn new() -> Self {
        Self::with_runner(SystemRunner)
    }
}

impl Default for PandocRenderer<SystemRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ToolRunner> PandocRenderer<R> {
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: ToolRunner> MarkdownRenderer for PandocRenderer<R> {
    fn render(&self, markdown: &str) -> Result<String, MarkdownError> {
        let invocation = Invocation::new("pandoc")
            .args(["-f", "markdown", "-t", "html"])
            .stdin(markdown.as_bytes());
        let output = self.runner.run(&invocation)?;
        Ok(String::from_utf8(output.stdout)?)
    }
}

/// Renders in process with `pulldown-cmark` (tables, footnotes and
/// strikethrough enabled).
#[derive(Debug, Default, Clone, Copy)]
pub struct CmarkRenderer;

impl MarkdownRenderer for CmarkRenderer {
    fn render(&self, markdown: &str) -> Result<String, MarkdownError> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH;
        let parser = Parser::new_ext(markdown, options);
        let mut html = String::new();
        md_html::push_html(&mut html, parser);
        Ok(html)
    }
}

/// Body copy resolved from the optional Markdown path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyCopy {
    /// No path was given.
    None,
    /// A path was given but nothing exists there.
    Missing(PathBuf),
    /// Rendered HTML.
    Rendered(String),
}

impl BodyCopy {
    /// The HTML to embed; empty unless a file was rendered.
    pub fn html(&self) -> &str {
        match self {
            BodyCopy::Rendered(html) => html,
            BodyCopy::None | BodyCopy::Missing(_) => "",
        }
    }
}

/// Read and render the Markdown file at `path`, if any.
///
/// A missing file is not an error: it is logged as a warning and yields
/// empty copy. A renderer failure is an error.
pub fn load_body_copy(
    path: Option<&Path>,
    renderer: &dyn MarkdownRenderer,
) -> Result<BodyCopy, MarkdownError> {
    let Some(path) = path else {
        return Ok(BodyCopy::None);
    };

    if !path.exists() {
        tracing::warn!(
            path = %path.display(),
            "markdown file for the body text does not exist, using empty copy"
        );
        return Ok(BodyCopy::Missing(path.to_path_buf()));
    }

    let markdown = fs::read_to_string(path)?;
    Ok(BodyCopy::Rendered(renderer.render(&markdown)?))
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::tool::ToolOutput;
    use crate::tool::tests::MockRunner;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Renderer that wraps input in a marker and records what it was given.
    #[derive(Default)]
    pub struct MockRenderer {
        pub inputs: RefCell<Vec<String>>,
    }

    impl MarkdownRenderer for MockRenderer {
        fn render(&self, markdown: &str) -> Result<String, MarkdownError> {
            self.inputs.borrow_mut().push(markdown.to_string());
            Ok(format!("<p>rendered:{}</p>", markdown.trim()))
        }
    }

    // =========================================================================
    // Renderers
    // =========================================================================

    #[test]
    fn pandoc_receives_markdown_on_stdin() {
        let runner = MockRunner::new();
        runner.push_result(Ok(ToolOutput {
            stdout: b"<h1>Hi</h1>\n".to_vec(),
            stderr: Vec::new(),
        }));
        let renderer = PandocRenderer::with_runner(runner);

        let html = renderer.render("# Hi").unwrap();

        assert_eq!(html, "<h1>Hi</h1>\n");
        let invs = renderer.runner.get_invocations();
        assert_eq!(invs.len(), 1);
        assert_eq!(invs[0].program, "pandoc");
        assert_eq!(invs[0].display(), "pandoc -f markdown -t html");
        assert_eq!(invs[0].stdin.as_deref(), Some(b"# Hi".as_slice()));
    }

    #[test]
    fn pandoc_missing_is_an_error() {
        let runner = MockRunner::new();
        runner.push_result(Err(ToolError::NotFound {
            program: "pandoc".into(),
        }));
        let renderer = PandocRenderer::with_runner(runner);

        let err = renderer.render("text").unwrap_err();
        assert!(matches!(err, MarkdownError::Tool(ToolError::NotFound { .. })));
    }

    #[test]
    fn pandoc_invalid_utf8_is_an_error() {
        let runner = MockRunner::new();
        runner.push_result(Ok(ToolOutput {
            stdout: vec![0xff, 0xfe],
            stderr: Vec::new(),
        }));
        let renderer = PandocRenderer::with_runner(runner);

        assert!(matches!(
            renderer.render("text").unwrap_err(),
            MarkdownError::Utf8(_)
        ));
    }

    #[test]
    fn cmark_converts_emphasis_and_headings() {
        let html = CmarkRenderer.render("# Summer\n\nThis is **bold**.").unwrap();
        assert!(html.contains("<h1>Summer</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn cmark_renders_tables() {
        let html = CmarkRenderer
            .render("| a | b |\n|---|---|\n| 1 | 2 |\n")
            .unwrap();
        assert!(html.contains("<table>"));
    }

    // =========================================================================
    // Body copy resolution
    // =========================================================================

    #[test]
    fn no_path_gives_empty_copy() {
        let renderer = MockRenderer::default();
        let copy = load_body_copy(None, &renderer).unwrap();
        assert_eq!(copy, BodyCopy::None);
        assert_eq!(copy.html(), "");
        assert!(renderer.inputs.borrow().is_empty());
    }

    #[test]
    fn missing_file_gives_empty_copy() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing.md");
        let renderer = MockRenderer::default();

        let copy = load_body_copy(Some(&path), &renderer).unwrap();

        assert_eq!(copy, BodyCopy::Missing(path));
        assert_eq!(copy.html(), "");
        assert!(renderer.inputs.borrow().is_empty());
    }

    #[test]
    fn existing_file_is_rendered() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("copy.md");
        fs::write(&path, "Trip to the lake\n").unwrap();
        let renderer = MockRenderer::default();

        let copy = load_body_copy(Some(&path), &renderer).unwrap();

        assert_eq!(copy.html(), "<p>rendered:Trip to the lake</p>");
        assert_eq!(renderer.inputs.borrow().as_slice(), ["Trip to the lake\n"]);
    }
}
