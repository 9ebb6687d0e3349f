//! The end-to-end documentation run: resolve, parse, emit.

use crate::config::GeneratorParams;
use crate::emitter;
use crate::error::Result;
use crate::extractor::go::GoApiParser;
use crate::extractor::ApiParser;
use crate::filter::RouteInclusionFilter;
use crate::model::ApiModel;
use crate::resolver::SourceRootResolver;
use crate::type_resolver::TypeOverrideRegistry;
use log::info;

/// Parses the configured package and returns the documentation model.
///
/// # Errors
///
/// Fails on an invalid controller pattern, when the main API file or the
/// package cannot be found, or when a source file cannot be read.
pub fn build_model(params: &GeneratorParams) -> Result<ApiModel> {
    let filter = RouteInclusionFilter::new(params.controller_class())?;
    let mut parser = GoApiParser::new(
        params.search_path().to_vec(),
        filter,
        TypeOverrideRegistry::default(),
    );

    info!("Start parsing");
    SourceRootResolver::new(params.search_path(), params.root_policy())
        .resolve(params.main_api_file(), &mut parser)?;
    parser.parse_api(params.api_package())?;
    info!("Finish parsing");

    Ok(parser.into_model())
}

/// Runs one generation with the given parameters.
///
/// Nothing is written unless parsing succeeds.
pub fn generate(params: &GeneratorParams) -> Result<()> {
    let model = build_model(params)?;
    info!(
        "Documenting {} API groups as {}",
        model.apis.len(),
        params.output_format()
    );
    emitter::emit(params.output_format(), &model, params.output_spec())
}
