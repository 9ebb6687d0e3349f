//! Human readable API documents in AsciiDoc, Markdown or Confluence wiki markup.
//!
//! A single document is produced per run. It opens with the API title,
//! description and version, followed by a table of contents linking every
//! group. Each group then gets a section with its operations, their
//! parameters and responses, and the models it references.

use crate::error::Result;
use crate::model::{
    ApiDeclaration, ApiGroupKey, ApiModel, ModelProperty, Operation, ResourceListing,
};
use crate::path_notation::translate;
use crate::serializer::write_to_file;
use log::debug;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

const DOCUMENT_STEM: &str = "API";
const DEFAULT_TITLE: &str = "API Documentation";

/// Markup dialects supported by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    AsciiDoc,
    Markdown,
    Confluence,
}

impl Dialect {
    pub fn markup(self) -> &'static dyn Markup {
        match self {
            Dialect::AsciiDoc => &AsciiDoc,
            Dialect::Markdown => &Markdown,
            Dialect::Confluence => &Confluence,
        }
    }

    /// `<output>/API.<extension>`
    pub fn document_path(self, output: &Path) -> PathBuf {
        output.join(format!("{}{}", DOCUMENT_STEM, self.markup().extension()))
    }
}

/// Syntax of one markup language.
///
/// Implementations only format fragments; [`render`] decides the layout.
pub trait Markup {
    /// File extension including the leading dot.
    fn extension(&self) -> &'static str;

    /// A section heading. Level 1 is the document title.
    fn heading(&self, level: usize, text: &str, anchor: Option<&str>) -> String;

    /// Bulleted link to an anchor in the same document.
    fn link_item(&self, anchor: &str, text: &str) -> String;

    fn table(&self, columns: &[&str], rows: &[Vec<String>]) -> String;

    fn paragraph(&self, text: &str) -> String {
        format!("{}\n\n", text.trim())
    }
}

/// AsciiDoc markup
pub struct AsciiDoc;

impl Markup for AsciiDoc {
    fn extension(&self) -> &'static str {
        ".adoc"
    }

    fn heading(&self, level: usize, text: &str, anchor: Option<&str>) -> String {
        let mut out = String::new();
        if let Some(anchor) = anchor {
            let _ = writeln!(out, "[[{}]]", anchor);
        }
        let _ = writeln!(out, "{} {}\n", "=".repeat(level), text);
        out
    }

    fn link_item(&self, anchor: &str, text: &str) -> String {
        format!("* <<{},{}>>\n", anchor, text)
    }

    fn table(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
        let mut out = String::from("[options=\"header\"]\n|===\n");
        for column in columns {
            let _ = write!(out, "|{}", escape_cell(column));
        }
        out.push('\n');
        for row in rows {
            for cell in row {
                let _ = write!(out, "|{}", escape_cell(cell));
            }
            out.push('\n');
        }
        out.push_str("|===\n\n");
        out
    }
}

/// GitHub flavoured Markdown
pub struct Markdown;

impl Markup for Markdown {
    fn extension(&self) -> &'static str {
        ".md"
    }

    fn heading(&self, level: usize, text: &str, anchor: Option<&str>) -> String {
        let mut out = String::new();
        if let Some(anchor) = anchor {
            let _ = writeln!(out, "<a name=\"{}\"></a>", anchor);
        }
        let _ = writeln!(out, "{} {}\n", "#".repeat(level), text);
        out
    }

    fn link_item(&self, anchor: &str, text: &str) -> String {
        format!("* [{}](#{})\n", text, anchor)
    }

    fn table(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
        let mut out = String::new();
        let header: Vec<String> = columns.iter().map(|c| escape_cell(c)).collect();
        let _ = writeln!(out, "| {} |", header.join(" | "));
        let _ = writeln!(out, "|{}", " --- |".repeat(columns.len()));
        for row in rows {
            let cells: Vec<String> = row.iter().map(|c| escape_cell(c)).collect();
            let _ = writeln!(out, "| {} |", cells.join(" | "));
        }
        out.push('\n');
        out
    }
}

/// Confluence wiki markup
pub struct Confluence;

impl Markup for Confluence {
    fn extension(&self) -> &'static str {
        ".confluence"
    }

    fn heading(&self, level: usize, text: &str, anchor: Option<&str>) -> String {
        match anchor {
            Some(anchor) => format!("h{}. {{anchor:{}}}{}\n\n", level, anchor, text),
            None => format!("h{}. {}\n\n", level, text),
        }
    }

    fn link_item(&self, anchor: &str, text: &str) -> String {
        format!("* [{}|#{}]\n", text, anchor)
    }

    fn table(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
        let mut out = String::new();
        for column in columns {
            let _ = write!(out, "||{}", escape_cell(column));
        }
        out.push_str("||\n");
        for row in rows {
            for cell in row {
                // Confluence collapses empty cells.
                let cell = if cell.is_empty() { " " } else { cell.as_str() };
                let _ = write!(out, "|{}", escape_cell(cell));
            }
            out.push_str("|\n");
        }
        out.push('\n');
        out
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

/// Anchor name for a group key, e.g. `store/orders` → `store-orders`.
fn anchor_for(key: &ApiGroupKey) -> String {
    key.as_str()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

/// Renders the whole model as one document.
pub fn render(model: &ApiModel, markup: &dyn Markup) -> String {
    let listing = &model.resource_listing;
    let mut out = String::new();

    render_preamble(listing, markup, &mut out);

    out.push_str(&markup.heading(2, "Contents", None));
    for key in model.apis.keys() {
        out.push_str(&markup.link_item(&anchor_for(key), &format!("/{}", key)));
    }
    out.push('\n');

    for (key, declaration) in &model.apis {
        render_group(key, declaration, listing, markup, &mut out);
    }
    out
}

fn render_preamble(listing: &ResourceListing, markup: &dyn Markup, out: &mut String) {
    let title = if listing.info.title.is_empty() {
        DEFAULT_TITLE
    } else {
        listing.info.title.as_str()
    };
    out.push_str(&markup.heading(1, title, None));
    if !listing.info.description.is_empty() {
        out.push_str(&markup.paragraph(&listing.info.description));
    }
    if !listing.api_version.is_empty() {
        out.push_str(&markup.paragraph(&format!("Version: {}", listing.api_version)));
    }
    if !listing.base_path.is_empty() {
        out.push_str(&markup.paragraph(&format!("Base path: {}", listing.base_path)));
    }
}

fn render_group(
    key: &ApiGroupKey,
    declaration: &ApiDeclaration,
    listing: &ResourceListing,
    markup: &dyn Markup,
    out: &mut String,
) {
    debug!("Rendering group {}", key);
    out.push_str(&markup.heading(2, &format!("/{}", key), Some(&anchor_for(key))));

    let description = listing
        .apis
        .iter()
        .find(|api_ref| ApiGroupKey::new(&api_ref.path).ok().as_ref() == Some(key))
        .map(|api_ref| api_ref.description.as_str())
        .unwrap_or_default();
    if !description.is_empty() {
        out.push_str(&markup.paragraph(description));
    }

    let summary_rows: Vec<Vec<String>> = declaration
        .apis
        .iter()
        .flat_map(|entry| {
            entry.operations.iter().map(move |operation| {
                vec![
                    operation.http_method.clone(),
                    translate(&entry.path),
                    operation.summary.clone(),
                ]
            })
        })
        .collect();
    out.push_str(&markup.table(&["Method", "Path", "Summary"], &summary_rows));

    for entry in &declaration.apis {
        for operation in &entry.operations {
            render_operation(&translate(&entry.path), operation, markup, out);
        }
    }

    if !declaration.models.is_empty() {
        out.push_str(&markup.heading(3, "Models", None));
        for model in declaration.models.values() {
            out.push_str(&markup.heading(4, &model.id, None));
            let rows: Vec<Vec<String>> = model
                .properties
                .iter()
                .map(|(name, property)| {
                    vec![
                        name.clone(),
                        property_type(property),
                        property.format.clone().unwrap_or_default(),
                        yes_no(model.required.contains(name)),
                        property.description.clone(),
                    ]
                })
                .collect();
            out.push_str(&markup.table(
                &["Property", "Type", "Format", "Required", "Description"],
                &rows,
            ));
        }
    }
}

fn render_operation(path: &str, operation: &Operation, markup: &dyn Markup, out: &mut String) {
    out.push_str(&markup.heading(3, &format!("{} {}", operation.http_method, path), None));
    if !operation.summary.is_empty() {
        out.push_str(&markup.paragraph(&operation.summary));
    }
    if !operation.notes.is_empty() {
        out.push_str(&markup.paragraph(&operation.notes));
    }

    if !operation.parameters.is_empty() {
        out.push_str(&markup.heading(4, "Parameters", None));
        let rows: Vec<Vec<String>> = operation
            .parameters
            .iter()
            .map(|param| {
                vec![
                    param.name.clone(),
                    param.param_type.clone(),
                    param.data_type.clone(),
                    yes_no(param.required),
                    param.description.clone(),
                ]
            })
            .collect();
        out.push_str(&markup.table(
            &["Name", "Located in", "Type", "Required", "Description"],
            &rows,
        ));
    }

    if !operation.response_messages.is_empty() {
        out.push_str(&markup.heading(4, "Responses", None));
        let rows: Vec<Vec<String>> = operation
            .response_messages
            .iter()
            .map(|response| {
                vec![
                    response.code.to_string(),
                    response.message.clone(),
                    response.response_model.clone(),
                ]
            })
            .collect();
        out.push_str(&markup.table(&["Code", "Message", "Model"], &rows));
    }
}

fn property_type(property: &ModelProperty) -> String {
    let named = |item_type: &Option<String>, reference: &Option<String>| {
        item_type
            .clone()
            .or_else(|| reference.clone())
            .unwrap_or_default()
    };
    match (&property.property_type, &property.items) {
        (Some(t), Some(items)) if t == "array" => {
            format!("array of {}", named(&items.item_type, &items.reference))
        }
        _ => named(&property.property_type, &property.reference),
    }
}

fn yes_no(flag: bool) -> String {
    let text = if flag { "yes" } else { "no" };
    text.to_string()
}

/// Writes `<output>/API.<ext>` in the given dialect.
pub fn generate_markup(model: &ApiModel, dialect: Dialect, output: &Path) -> Result<()> {
    let document = render(model, dialect.markup());
    let path = dialect.document_path(output);
    debug!("Writing {:?} document to {}", dialect, path.display());
    write_to_file(&document, &path)
}
