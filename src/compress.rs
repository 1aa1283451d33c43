//! Batch compression through a user supplied command.
//!
//! Every file directly inside the source directory whose name ends in `jpg`
//! is handed to an external command, once per file. The command is given as
//! a template containing `{input}` and `{output}`:
//!
//! ```text
//! photo-tiles compress --sourcedir month_07 --destdir month_07_q60 \
//!     --cmd "convert {input} -quality 60 {output}"
//! ```
//!
//! The template is split on whitespace **before** substitution, so a path
//! containing spaces stays a single argument. No shell is involved: pipes,
//! redirects and globs in the template are passed through literally.

use crate::listing::{file_name_lossy, list_entries};
use crate::tool::{Invocation, ToolRunner};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const INPUT: &str = "{input}";
const OUTPUT: &str = "{output}";

#[derive(Error, Debug)]
pub enum CompressError {
    #[error("Invalid command template: {0}")]
    Template(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory listing failed: {0}")]
    Walk(#[from] walkdir::Error),
}

/// A parsed command template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    tokens: Vec<String>,
}

impl CommandTemplate {
    pub fn parse(template: &str) -> Result<Self, CompressError> {
        let tokens: Vec<String> = template.split_whitespace().map(str::to_string).collect();
        if tokens.is_empty() {
            return Err(CompressError::Template("command is empty".into()));
        }
        for placeholder in [INPUT, OUTPUT] {
            if !tokens.iter().any(|t| t.contains(placeholder)) {
                return Err(CompressError::Template(format!(
                    "'{template}' must contain {placeholder}"
                )));
            }
        }
        Ok(Self { tokens })
    }

    /// Substitute the placeholders for one file.
    pub fn invocation(&self, input: &Path, output: &Path) -> Invocation {
        let input = input.to_string_lossy();
        let output = output.to_string_lossy();
        let mut tokens = self
            .tokens
            .iter()
            .map(|t| t.replace(INPUT, &input).replace(OUTPUT, &output));
        // parse() guarantees at least one token
        let program = tokens.next().unwrap_or_default();
        Invocation::new(program).args(tokens)
    }
}

/// A file whose command failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressFailure {
    pub source: PathBuf,
    pub reason: String,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompressReport {
    /// Output paths written successfully, in source order.
    pub processed: Vec<PathBuf>,
    pub failures: Vec<CompressFailure>,
}

/// Run `template` for every `*jpg` file directly inside `source_dir`,
/// writing to `dest_dir/<name>`.
///
/// One failing file does not stop the rest; failures are collected in the
/// report.
pub fn compress(
    template: &str,
    source_dir: &Path,
    dest_dir: &Path,
    runner: &impl ToolRunner,
) -> Result<CompressReport, CompressError> {
    let template = CommandTemplate::parse(template)?;
    let source_dir = std::path::absolute(source_dir)?;
    let dest_dir = std::path::absolute(dest_dir)?;

    let sources: Vec<PathBuf> = list_entries(&source_dir)?
        .into_iter()
        .filter(|p| file_name_lossy(p).ends_with("jpg"))
        .collect();

    fs::create_dir_all(&dest_dir)?;

    let mut report = CompressReport::default();
    for source in sources {
        let dest = dest_dir.join(file_name_lossy(&source));
        let invocation = template.invocation(&source, &dest);
        match runner.run(&invocation) {
            Ok(_) => {
                tracing::debug!(source = %source.display(), dest = %dest.display(), "compressed");
                report.processed.push(dest);
            }
            Err(e) => {
                tracing::error!(source = %source.display(), error = %e, "compression failed");
                report.failures.push(CompressFailure {
                    source,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}
