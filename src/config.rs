//! Generator configuration.
//!
//! [`GeneratorParams`] is built once from the command line and the search-path
//! environment variable, then passed by reference through the pipeline.

use crate::emitter::OutputFormat;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Environment variable holding the colon-separated source roots.
pub const SEARCH_PATH_VAR: &str = "GOPATH";

/// What to do when the main API file exists under several roots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RootMatchPolicy {
    /// Parse every match in search-path order; later files overwrite earlier values.
    #[default]
    EveryMatch,
    /// Parse only the first match.
    FirstMatch,
}

/// Immutable configuration snapshot for one generation run
///
/// Fields are only set through [`GeneratorParams::new`], so a value always
/// carries a validated format and a non-empty search path.
#[derive(Debug, Clone)]
pub struct GeneratorParams {
    api_package: String,
    main_api_file: String,
    output_format: OutputFormat,
    output_spec: PathBuf,
    controller_class: Option<String>,
    search_path: Vec<PathBuf>,
    root_policy: RootMatchPolicy,
}

impl GeneratorParams {
    /// Creates the parameters, defaulting the main file to `<api_package>/main.go`
    /// and validating the format name before anything touches the filesystem.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unknown format name or an empty
    /// search path.
    pub fn new(
        api_package: &str,
        main_api_file: Option<&str>,
        output_format: &str,
        output_spec: PathBuf,
        controller_class: Option<String>,
        search_path: Vec<PathBuf>,
    ) -> Result<Self> {
        let output_format: OutputFormat = output_format.parse()?;
        if search_path.is_empty() {
            return Err(Error::Configuration(
                "the source search path is empty".to_string(),
            ));
        }
        let main_api_file = match main_api_file {
            Some(file) if !file.is_empty() => file.to_string(),
            _ => format!("{}/main.go", api_package),
        };
        Ok(Self {
            api_package: api_package.to_string(),
            main_api_file,
            output_format,
            output_spec,
            controller_class: controller_class.filter(|c| !c.is_empty()),
            search_path,
            root_policy: RootMatchPolicy::default(),
        })
    }

    /// Switches the root match policy.
    pub fn with_root_policy(mut self, root_policy: RootMatchPolicy) -> Self {
        self.root_policy = root_policy;
        self
    }

    /// Package implementing the API controllers, relative to `<root>/src`
    pub fn api_package(&self) -> &str {
        &self.api_package
    }

    /// File with the general API annotations, relative to `<root>/src`
    pub fn main_api_file(&self) -> &str {
        &self.main_api_file
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    /// Output directory for the generated file(s)
    pub fn output_spec(&self) -> &Path {
        &self.output_spec
    }

    /// Receiver type pattern restricting which methods are parsed
    pub fn controller_class(&self) -> Option<&str> {
        self.controller_class.as_deref()
    }

    /// Candidate source roots, in lookup order
    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    pub fn root_policy(&self) -> RootMatchPolicy {
        self.root_policy
    }
}

/// Splits a colon-separated search path, skipping empty entries.
pub fn parse_search_path(value: &str) -> Vec<PathBuf> {
    value
        .split(':')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Reads the search path from [`SEARCH_PATH_VAR`].
///
/// # Errors
///
/// Returns a configuration error if the variable is unset or holds no roots.
pub fn search_path_from_env() -> Result<Vec<PathBuf>> {
    let value = std::env::var(SEARCH_PATH_VAR).unwrap_or_default();
    let roots = parse_search_path(&value);
    if roots.is_empty() {
        return Err(Error::Configuration(format!(
            "please, set ${} environment variable",
            SEARCH_PATH_VAR
        )));
    }
    Ok(roots)
}
