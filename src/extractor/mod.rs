//! Extraction of the API model from annotated source code.
//!
//! The pipeline talks to the annotation parser only through the [`ApiParser`]
//! trait: the main API file is parsed first (once per matching search root),
//! then the controller package is walked to build the per-group
//! declarations.
//!
//! # Example
//!
//! ```no_run
//! use swagger_docgen::extractor::{ApiParser, go::GoApiParser};
//! use swagger_docgen::filter::RouteInclusionFilter;
//! use swagger_docgen::type_resolver::TypeOverrideRegistry;
//! use std::path::{Path, PathBuf};
//!
//! let mut parser = GoApiParser::new(
//!     vec![PathBuf::from("/go")],
//!     RouteInclusionFilter::new(None).unwrap(),
//!     TypeOverrideRegistry::default(),
//! );
//! parser.parse_general_api_info(Path::new("/go/src/acme/api/main.go")).unwrap();
//! parser.parse_api("acme/api").unwrap();
//! println!("Found {} API groups", parser.top_level_apis().len());
//! ```

pub mod annotations;
pub mod go;

use crate::error::{Error, Result};
use crate::model::{ApiModel, ResourceListing, TopLevelApis};
use crate::serializer::to_indented_json;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Source-annotation parser consumed by the documentation pipeline.
pub trait ApiParser {
    /// Parses the file carrying the general API annotations, updating the
    /// resource listing. Later calls overwrite values set by earlier ones.
    fn parse_general_api_info(&mut self, path: &Path) -> Result<()>;

    /// Walks the controller package and builds the per-group declarations.
    fn parse_api(&mut self, api_package: &str) -> Result<()>;

    /// The root listing accumulated so far.
    fn resource_listing(&self) -> &ResourceListing;

    /// Every group parsed by [`ApiParser::parse_api`].
    fn top_level_apis(&self) -> &TopLevelApis;

    /// The resource listing as indented JSON.
    fn resource_listing_json(&self) -> Result<String> {
        to_indented_json(self.resource_listing(), "resource listing")
    }

    /// Hands the finished model over to the emitters.
    fn into_model(self) -> ApiModel
    where
        Self: Sized;
}

/// HTTP methods accepted in `@Router` annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl HttpMethod {
    /// Upper-case wire name, e.g. `GET`.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(HttpMethod::Get),
            "post" => Ok(HttpMethod::Post),
            "put" => Ok(HttpMethod::Put),
            "delete" => Ok(HttpMethod::Delete),
            "patch" => Ok(HttpMethod::Patch),
            "options" => Ok(HttpMethod::Options),
            "head" => Ok(HttpMethod::Head),
            other => Err(Error::Configuration(format!("unknown HTTP method '{}'", other))),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
