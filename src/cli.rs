use crate::config::{search_path_from_env, GeneratorParams, RootMatchPolicy};
use crate::generator;
use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use log::{debug, info};
use std::path::PathBuf;

/// Swagger docgen - Generate swagger 1.2 documentation from annotated Go API sources
#[derive(Parser, Debug)]
#[command(name = "swagger-docgen")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Package that implements the API controllers, relative to $GOPATH/src
    #[arg(long = "apiPackage", visible_alias = "api-package", value_name = "PKG")]
    pub api_package: Option<String>,

    /// File that contains the general API annotations, relative to $GOPATH/src
    /// (default: <apiPackage>/main.go)
    #[arg(long = "mainApiFile", visible_alias = "main-api-file", value_name = "FILE")]
    pub main_api_file: Option<String>,

    /// Output format: go, swagger, asciidoc, markdown or confluence
    #[arg(short = 'f', long = "format", value_name = "FORMAT", default_value = "go")]
    pub format: String,

    /// Output directory for the generated file(s)
    #[arg(short = 'o', long = "output", value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    /// Only parse methods whose pointer receiver type matches this regular expression
    #[arg(long = "controllerClass", visible_alias = "controller-class", value_name = "REGEX")]
    pub controller_class: Option<String>,

    /// Parse the main API file from the first matching root only
    #[arg(long = "first-match")]
    pub first_match: bool,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Parse command line arguments
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

/// Builds the generator parameters from the arguments and `$GOPATH`.
///
/// Returns `None` when no API package was given.
pub fn params_from_args(args: &CliArgs) -> Result<Option<GeneratorParams>> {
    debug!("Parsed arguments: {:?}", args);

    let Some(api_package) = args.api_package.as_deref().filter(|p| !p.is_empty()) else {
        return Ok(None);
    };

    let search_path = search_path_from_env()?;
    let policy = if args.first_match {
        RootMatchPolicy::FirstMatch
    } else {
        RootMatchPolicy::EveryMatch
    };

    let params = GeneratorParams::new(
        api_package,
        args.main_api_file.as_deref(),
        &args.format,
        args.output.clone(),
        args.controller_class.clone(),
        search_path,
    )?
    .with_root_policy(policy);

    info!("API package: {}", params.api_package());
    info!("Main API file: {}", params.main_api_file());
    info!("Output format: {}", params.output_format());
    info!("Output: {}", params.output_spec().display());
    if let Some(pattern) = params.controller_class() {
        info!("Controller class: {}", pattern);
    }

    Ok(Some(params))
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    let Some(params) = params_from_args(&args)? else {
        CliArgs::command()
            .print_help()
            .context("Failed to print usage")?;
        return Ok(());
    };

    generator::generate(&params).with_context(|| {
        format!(
            "Failed to generate {} documentation for {}",
            params.output_format(),
            params.api_package()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::OutputFormat;

    #[test]
    fn test_parse_camel_case_flags() {
        let args = CliArgs::try_parse_from([
            "swagger-docgen",
            "--apiPackage",
            "acme/api",
            "--mainApiFile",
            "acme/api/app.go",
            "--controllerClass",
            "Controller$",
            "-f",
            "swagger",
            "-o",
            "out",
        ])
        .unwrap();

        assert_eq!(args.api_package.as_deref(), Some("acme/api"));
        assert_eq!(args.main_api_file.as_deref(), Some("acme/api/app.go"));
        assert_eq!(args.controller_class.as_deref(), Some("Controller$"));
        assert_eq!(args.format, "swagger");
        assert_eq!(args.output, PathBuf::from("out"));
        assert!(!args.first_match);
    }

    #[test]
    fn test_parse_kebab_case_aliases() {
        let args = CliArgs::try_parse_from([
            "swagger-docgen",
            "--api-package",
            "acme/api",
            "--main-api-file",
            "acme/api/app.go",
            "--controller-class",
            "Pet",
            "--first-match",
        ])
        .unwrap();

        assert_eq!(args.api_package.as_deref(), Some("acme/api"));
        assert_eq!(args.main_api_file.as_deref(), Some("acme/api/app.go"));
        assert_eq!(args.controller_class.as_deref(), Some("Pet"));
        assert!(args.first_match);
    }

    #[test]
    fn test_defaults() {
        let args = CliArgs::try_parse_from(["swagger-docgen"]).unwrap();

        assert_eq!(args.api_package, None);
        assert_eq!(args.format, "go");
        assert_eq!(args.output, PathBuf::from("."));
        assert!(!args.verbose);
    }

    #[test]
    fn test_missing_package_yields_no_params() {
        let args = CliArgs::try_parse_from(["swagger-docgen", "-f", "markdown"]).unwrap();
        assert!(params_from_args(&args).unwrap().is_none());
    }

    #[test]
    fn test_format_is_parsed_case_insensitively() {
        // Validation happens on GeneratorParams; the raw flag is kept as typed.
        let args = CliArgs::try_parse_from(["swagger-docgen", "-f", "AsciiDoc"]).unwrap();
        assert_eq!(args.format.parse::<OutputFormat>().unwrap(), OutputFormat::AsciiDoc);
    }
}
