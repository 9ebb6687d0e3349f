//! Output emitters for the documentation model.
//!
//! Each output format is a closed variant of [`OutputFormat`]. The dispatcher
//! validates the format name before anything touches the filesystem, so an
//! unknown format never leaves partial output behind.
//!
//! # Formats
//!
//! - `go`: an embeddable Go source module, see [`runtime_module`]
//! - `swagger`: a static tree of swagger 1.2 JSON files, see [`json_tree`]
//! - `asciidoc`, `markdown`, `confluence`: one human readable document, see [`markup`]

pub mod json_tree;
pub mod markup;
pub mod runtime_module;

use crate::error::{Error, Result};
use crate::model::ApiModel;
use log::{debug, info};
use markup::Dialect;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Format names accepted by the dispatcher.
pub const AVAILABLE_FORMATS: &str = "go|swagger|asciidoc|markdown|confluence";

/// The closed set of output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Go,
    Swagger,
    AsciiDoc,
    Markdown,
    Confluence,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Go => "go",
            OutputFormat::Swagger => "swagger",
            OutputFormat::AsciiDoc => "asciidoc",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Confluence => "confluence",
        }
    }

    /// Message logged once the format's artifacts are on disk.
    pub fn confirmation(self) -> &'static str {
        match self {
            OutputFormat::Go => "Doc file generated",
            OutputFormat::Swagger => "Swagger UI files generated",
            OutputFormat::AsciiDoc => "AsciiDoc file generated",
            OutputFormat::Markdown => "MarkDown file generated",
            OutputFormat::Confluence => "Confluence file generated",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "go" => Ok(OutputFormat::Go),
            "swagger" => Ok(OutputFormat::Swagger),
            "asciidoc" => Ok(OutputFormat::AsciiDoc),
            "markdown" => Ok(OutputFormat::Markdown),
            "confluence" => Ok(OutputFormat::Confluence),
            _ => Err(Error::Configuration(format!(
                "invalid format '{}', must be one of {}",
                s, AVAILABLE_FORMATS
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders the model in the given format under `output`.
///
/// # Errors
///
/// Returns the first serialization or I/O error. Files written before the
/// failure are left in place.
pub fn emit(format: OutputFormat, model: &ApiModel, output: &Path) -> Result<()> {
    debug!(
        "Emitting {} groups as {} into {}",
        model.apis.len(),
        format,
        output.display()
    );

    match format {
        OutputFormat::Go => runtime_module::generate(model, output)?,
        OutputFormat::Swagger => json_tree::generate(model, output)?,
        OutputFormat::AsciiDoc => markup::generate_markup(model, Dialect::AsciiDoc, output)?,
        OutputFormat::Markdown => markup::generate_markup(model, Dialect::Markdown, output)?,
        OutputFormat::Confluence => markup::generate_markup(model, Dialect::Confluence, output)?,
    }

    info!("{}", format.confirmation());
    Ok(())
}

/// Resolves `format_name` case-insensitively and emits the model.
///
/// # Errors
///
/// An unknown name yields a configuration error listing the accepted
/// formats, and nothing is written.
pub fn dispatch(format_name: &str, model: &ApiModel, output: &Path) -> Result<()> {
    let format: OutputFormat = format_name.parse()?;
    emit(format, model, output)
}
