//! swagger-docgen - API documentation from annotated Go sources.
//!
//! The library reads beego-style comment annotations from a Go API package and
//! renders them as swagger 1.2 documentation in one of five output formats.
//!
//! # Architecture
//!
//! 1. [`config`] - Generator parameters and the `$GOPATH` search path
//! 2. [`resolver`] - Finds the main API file across the source roots
//! 3. [`scanner`] - Recursively scans the API package for Go files
//! 4. [`parser`] - Extracts function and struct declarations from Go files
//! 5. [`filter`] - Decides which handlers take part in documentation
//! 6. [`extractor`] - Turns annotations into the documentation model
//! 7. [`type_resolver`] and [`schema_generator`] - Map Go types to swagger types and models
//! 8. [`api_builder`] - Groups operations into per-group API declarations
//! 9. [`emitter`] - Writes the model as a Go module, a JSON tree or a markup document
//!
//! [`generator`] ties the steps together.
//!
//! # Example Usage
//!
//! ```no_run
//! use swagger_docgen::config::{search_path_from_env, GeneratorParams};
//! use swagger_docgen::generator;
//! use std::path::PathBuf;
//!
//! let params = GeneratorParams::new(
//!     "github.com/acme/petstore",
//!     None,
//!     "swagger",
//!     PathBuf::from("./swagger"),
//!     Some("Controller$".to_string()),
//!     search_path_from_env().unwrap(),
//! )
//! .unwrap();
//!
//! generator::generate(&params).unwrap();
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module.

pub mod api_builder;
pub mod cli;
pub mod config;
pub mod emitter;
pub mod error;
pub mod extractor;
pub mod filter;
pub mod generator;
pub mod model;
pub mod parser;
pub mod path_notation;
pub mod resolver;
pub mod scanner;
pub mod schema_generator;
pub mod serializer;
pub mod type_resolver;
