//! Parsing of `@Tag` annotations in Go comments.

use crate::extractor::HttpMethod;
use crate::model::{ApiRef, ResourceListing};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

static PARAM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(\S+)\s+(\S+)\s+(\S+)\s+(\S+)(?:\s+"([^"]*)")?"#)
        .expect("param annotation regex is valid")
});

static RESPONSE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(\d{3})\s*(?:\{(\w+)\}\s*([^\s"]+))?\s*(.*)$"#)
        .expect("response annotation regex is valid")
});

static ROUTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\S+)(?:\s+\[(\w+)\])?").expect("router annotation regex is valid")
});

static SUB_API_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.*?)\s*\[([^\]]+)\]\s*$").expect("sub api annotation regex is valid")
});

/// Splits `@Tag rest of line` into a lower-cased tag and its trimmed value.
fn split_annotation(line: &str) -> Option<(String, &str)> {
    let body = line.trim().strip_prefix('@')?;
    let (tag, value) = match body.find(char::is_whitespace) {
        Some(idx) => (&body[..idx], body[idx..].trim()),
        None => (body, ""),
    };
    if tag.is_empty() {
        return None;
    }
    Some((tag.to_ascii_lowercase(), value))
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Applies one general-info comment line to the listing.
///
/// Returns whether the line carried a known annotation.
pub fn apply_general_annotation(listing: &mut ResourceListing, line: &str) -> bool {
    let Some((tag, value)) = split_annotation(line) else {
        return false;
    };
    let value = value.to_string();
    match tag.as_str() {
        "apiversion" => listing.api_version = value,
        "apititle" => listing.info.title = value,
        "apidescription" => listing.info.description = value,
        "contact" => listing.info.contact = value,
        "termsofserviceurl" => listing.info.terms_of_service_url = value,
        "license" => listing.info.license = value,
        "licenseurl" => listing.info.license_url = value,
        "basepath" => listing.base_path = value,
        "subapi" => match SUB_API_RE.captures(&value) {
            Some(caps) => {
                let api_ref = ApiRef {
                    path: caps[2].trim().to_string(),
                    description: caps[1].to_string(),
                };
                match listing.apis.iter_mut().find(|r| r.path == api_ref.path) {
                    Some(existing) => *existing = api_ref,
                    None => listing.apis.push(api_ref),
                }
            }
            None => {
                warn!("Ignoring malformed @SubApi annotation: {}", value);
                return false;
            }
        },
        _ => return false,
    }
    true
}

/// `@Param name paramType dataType required "description"`
#[derive(Debug, Clone, PartialEq)]
pub struct ParamAnnotation {
    pub name: String,
    pub param_type: String,
    pub data_type: String,
    pub required: bool,
    pub description: String,
}

/// Whether a response type is declared `{object}` or `{array}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Object,
    Array,
}

/// `@Success` / `@Failure code {kind} Type "message"`
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseAnnotation {
    pub code: u16,
    pub is_success: bool,
    pub kind: ResponseKind,
    pub type_name: Option<String>,
    pub message: String,
}

/// `@Router path [method]`
#[derive(Debug, Clone, PartialEq)]
pub struct RouterAnnotation {
    pub path: String,
    pub method: HttpMethod,
}

/// Everything annotated on one handler's doc comment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationAnnotations {
    pub title: Option<String>,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub accept: Vec<String>,
    pub produce: Vec<String>,
    pub params: Vec<ParamAnnotation>,
    pub responses: Vec<ResponseAnnotation>,
    pub resource: Option<String>,
    pub router: Option<RouterAnnotation>,
}

impl OperationAnnotations {
    /// Parses the doc comment lines of a handler. Malformed annotations are
    /// logged and skipped.
    pub fn parse(doc: &[String]) -> Self {
        let mut annotations = Self::default();
        for line in doc {
            if let Some((tag, value)) = split_annotation(line) {
                annotations.apply(&tag, value);
            }
        }
        annotations
    }

    fn apply(&mut self, tag: &str, value: &str) {
        match tag {
            "title" => self.title = Some(value.to_string()),
            "description" => self.description = Some(value.to_string()),
            "summary" => self.summary = Some(value.to_string()),
            "accept" => self.accept.extend(split_list(value)),
            "produce" | "produces" => self.produce.extend(split_list(value)),
            "resource" => self.resource = Some(value.to_string()),
            "param" => match parse_param(value) {
                Some(param) => self.params.push(param),
                None => warn!("Ignoring malformed @Param annotation: {}", value),
            },
            "success" | "failure" => match parse_response(value, tag == "success") {
                Some(response) => self.responses.push(response),
                None => warn!("Ignoring malformed @{} annotation: {}", tag, value),
            },
            "router" => match parse_router(value) {
                Some(router) => self.router = Some(router),
                None => warn!("Ignoring malformed @Router annotation: {}", value),
            },
            _ => {}
        }
    }

    /// The first success response that names a type.
    pub fn success_type(&self) -> Option<&ResponseAnnotation> {
        self.responses
            .iter()
            .find(|r| r.is_success && r.type_name.is_some())
    }
}

fn parse_param(value: &str) -> Option<ParamAnnotation> {
    let caps = PARAM_RE.captures(value)?;
    let required = match caps[4].to_ascii_lowercase().as_str() {
        "true" => true,
        "false" => false,
        _ => return None,
    };
    Some(ParamAnnotation {
        name: caps[1].to_string(),
        param_type: caps[2].to_string(),
        data_type: caps[3].to_string(),
        required,
        description: caps.get(5).map(|c| c.as_str().to_string()).unwrap_or_default(),
    })
}

fn parse_response(value: &str, is_success: bool) -> Option<ResponseAnnotation> {
    let caps = RESPONSE_RE.captures(value)?;
    let code = caps[1].parse().ok()?;
    let kind = match caps.get(2).map(|k| k.as_str().to_ascii_lowercase()) {
        Some(kind) if kind == "array" => ResponseKind::Array,
        _ => ResponseKind::Object,
    };
    Some(ResponseAnnotation {
        code,
        is_success,
        kind,
        type_name: caps.get(3).map(|t| t.as_str().to_string()),
        message: caps[4].trim().trim_matches('"').to_string(),
    })
}

fn parse_router(value: &str) -> Option<RouterAnnotation> {
    let caps = ROUTER_RE.captures(value)?;
    let method = match caps.get(2) {
        Some(method) => method.as_str().parse().ok()?,
        None => HttpMethod::Get,
    };
    Some(RouterAnnotation {
        path: caps[1].to_string(),
        method,
    })
}
