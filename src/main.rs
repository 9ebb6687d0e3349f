//! swagger-docgen - Command-line tool for generating API documentation from Go sources.
//!
//! Reads the general API annotations from the main API file, parses the
//! annotated controllers of the API package found under `$GOPATH/src`, and
//! writes the documentation in the requested format.
//!
//! # Usage
//!
//! ```bash
//! swagger-docgen --apiPackage <PKG> [OPTIONS]
//! ```
//!
//! # Examples
//!
//! Generate the embeddable Go module (`./docs/docs.go`):
//! ```bash
//! swagger-docgen --apiPackage github.com/acme/petstore
//! ```
//!
//! Generate a swagger-ui file tree:
//! ```bash
//! swagger-docgen --apiPackage github.com/acme/petstore -f swagger -o ./swagger
//! ```
//!
//! Only parse methods of `*...Controller` receivers, with verbose logging:
//! ```bash
//! swagger-docgen --apiPackage github.com/acme/petstore --controllerClass 'Controller$' -v
//! ```

use anyhow::Result;
use log::info;
use swagger_docgen::cli;

fn main() -> Result<()> {
    let args = cli::parse_args();

    // Initialize logger based on verbose flag
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("swagger-docgen starting...");

    cli::run(args)?;

    Ok(())
}
