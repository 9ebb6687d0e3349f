use crate::error::{Error, Result};
use crate::filter::Receiver;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

static FUNC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^func\s*(?:\(\s*(?:\w+\s+)?(\*)?\s*([\w.]+)(?:\[[^\]]*\])?\s*\)\s*)?(\w+)")
        .expect("function declaration regex is valid")
});

static STRUCT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^type\s+(\w+)\s+struct\s*\{\s*(\})?").expect("struct declaration regex is valid")
});

static FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\w+)\s+([\w.\[\]*{}]+)\s*(?:`([^`]*)`)?\s*(?://\s*(.*))?$")
        .expect("struct field regex is valid")
});

static JSON_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"json:"([^"]*)""#).expect("json tag regex is valid"));

static PACKAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^package\s+(\w+)").expect("package clause regex is valid"));

/// Line-based declaration parser for Go source files.
///
/// Extracts just what the annotation parser needs: function declarations with
/// their receivers and doc comments, and struct declarations with their
/// fields. Function bodies are skipped unread.
///
/// # Example
///
/// ```no_run
/// use swagger_docgen::parser::GoParser;
/// use std::path::Path;
///
/// let parsed = GoParser::parse_file(Path::new("/go/src/acme/api/controllers/user.go")).unwrap();
/// println!("Parsed {} functions", parsed.functions.len());
/// ```
pub struct GoParser;

/// A parsed Go source file
#[derive(Debug, Clone)]
pub struct ParsedFile {
    /// Path to the source file
    pub path: PathBuf,
    /// Name from the `package` clause, empty if absent
    pub package_name: String,
    /// Top-level function and method declarations
    pub functions: Vec<FuncDecl>,
    /// Top-level struct type declarations
    pub structs: Vec<StructDecl>,
}

/// A function or method declaration
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub name: String,
    pub receiver: Option<Receiver>,
    /// Text of the `//` comment lines directly above the declaration
    pub doc: Vec<String>,
}

/// A struct type declaration
#[derive(Debug, Clone, PartialEq)]
pub struct StructDecl {
    pub name: String,
    pub fields: Vec<FieldDecl>,
}

/// A named struct field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    /// Go field name
    pub name: String,
    /// Type expression as written, e.g. `[]*Tag`
    pub type_expr: String,
    /// Name from the `json` tag, if any
    pub json_name: Option<String>,
    pub omit_empty: bool,
    /// Tagged `json:"-"`
    pub skip: bool,
    /// Trailing line comment
    pub description: String,
}

impl FieldDecl {
    /// Name the field is serialized under.
    pub fn wire_name(&self) -> &str {
        self.json_name.as_deref().unwrap_or(&self.name)
    }
}

impl GoParser {
    /// Reads and parses a single Go source file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read.
    pub fn parse_file(path: &Path) -> Result<ParsedFile> {
        debug!("Parsing file: {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let parsed = Self::parse_source(path, &content);

        debug!(
            "Parsed {}: {} functions, {} structs",
            path.display(),
            parsed.functions.len(),
            parsed.structs.len()
        );
        Ok(parsed)
    }

    /// Parses multiple files, continuing past the ones that fail.
    ///
    /// Failures are logged as warnings and returned in place.
    pub fn parse_files(paths: &[PathBuf]) -> Vec<Result<ParsedFile>> {
        debug!("Parsing {} files", paths.len());

        let results: Vec<Result<ParsedFile>> = paths
            .iter()
            .map(|path| {
                Self::parse_file(path).inspect_err(|e| {
                    warn!("Failed to parse {}: {}", path.display(), e);
                })
            })
            .collect();

        let success_count = results.iter().filter(|r| r.is_ok()).count();
        debug!(
            "Parsing complete: {} succeeded, {} failed",
            success_count,
            results.len() - success_count
        );

        results
    }

    /// Parses Go source text already in memory.
    pub fn parse_source(path: &Path, content: &str) -> ParsedFile {
        let mut parsed = ParsedFile {
            path: path.to_path_buf(),
            package_name: String::new(),
            functions: Vec::new(),
            structs: Vec::new(),
        };

        let mut doc: Vec<String> = Vec::new();
        let mut lines = content.lines();

        while let Some(line) = lines.next() {
            let trimmed = line.trim();

            if let Some(comment) = trimmed.strip_prefix("//") {
                doc.push(comment.trim().to_string());
                continue;
            }

            if let Some(caps) = PACKAGE_RE.captures(trimmed) {
                parsed.package_name = caps[1].to_string();
            } else if let Some(caps) = FUNC_RE.captures(line) {
                let receiver = caps.get(2).map(|type_name| Receiver {
                    type_name: type_name.as_str().to_string(),
                    is_pointer: caps.get(1).is_some(),
                });
                parsed.functions.push(FuncDecl {
                    name: caps[3].to_string(),
                    receiver,
                    doc: std::mem::take(&mut doc),
                });
            } else if let Some(caps) = STRUCT_RE.captures(line) {
                let name = caps[1].to_string();
                let fields = if caps.get(2).is_some() {
                    Vec::new()
                } else {
                    Self::parse_struct_body(&mut lines)
                };
                parsed.structs.push(StructDecl { name, fields });
            }

            doc.clear();
        }

        parsed
    }

    /// Consumes lines up to the closing brace of a struct, collecting fields.
    ///
    /// Fields of nested anonymous structs are not collected.
    fn parse_struct_body<'a>(lines: &mut impl Iterator<Item = &'a str>) -> Vec<FieldDecl> {
        let mut fields = Vec::new();
        let mut depth = 1usize;

        for line in lines {
            let (opens, closes) = block_braces(strip_line_comment(line));

            if depth == 1 && opens == 0 && closes == 0 {
                if let Some(field) = Self::parse_field(line) {
                    fields.push(field);
                }
            }

            depth = (depth + opens).saturating_sub(closes);
            if depth == 0 {
                break;
            }
        }

        fields
    }

    fn parse_field(line: &str) -> Option<FieldDecl> {
        let caps = FIELD_RE.captures(line)?;
        let name = caps[1].to_string();
        let type_expr = caps[2].to_string();

        let mut json_name = None;
        let mut omit_empty = false;
        let mut skip = false;
        if let Some(tag) = caps.get(3).and_then(|tag| JSON_TAG_RE.captures(tag.as_str())) {
            let mut parts = tag[1].split(',');
            match parts.next() {
                Some("-") => skip = true,
                Some("") | None => {}
                Some(tag_name) => json_name = Some(tag_name.to_string()),
            }
            omit_empty = parts.any(|option| option == "omitempty");
        }

        Some(FieldDecl {
            name,
            type_expr,
            json_name,
            omit_empty,
            skip,
            description: caps
                .get(4)
                .map(|c| c.as_str().trim().to_string())
                .unwrap_or_default(),
        })
    }
}

/// Counts the braces that open or close a block.
///
/// Empty `{}` pairs inside type expressions (`interface{}`, `struct{}`) and
/// anything inside back-quoted tags are ignored.
fn block_braces(code: &str) -> (usize, usize) {
    let mut outside_tags = String::with_capacity(code.len());
    for (i, part) in code.split('`').enumerate() {
        if i % 2 == 0 {
            outside_tags.push_str(part);
        }
    }
    let code = outside_tags.replace("{}", "");
    (code.matches('{').count(), code.matches('}').count())
}

/// Drops a trailing `//` comment that is not inside a back-quoted tag.
fn strip_line_comment(line: &str) -> &str {
    let mut in_tag = false;
    let bytes = line.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        match b {
            b'`' => in_tag = !in_tag,
            b'/' if !in_tag && bytes.get(i + 1) == Some(&b'/') => return &line[..i],
            _ => {}
        }
    }
    line
}
