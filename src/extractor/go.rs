use crate::api_builder::{reconcile_listing, ApiBuilder};
use crate::error::{Error, Result};
use crate::extractor::annotations::{
    apply_general_annotation, OperationAnnotations, ParamAnnotation, ResponseKind,
};
use crate::extractor::ApiParser;
use crate::filter::{CandidateRoute, RouteInclusionFilter};
use crate::model::{
    ApiGroupKey, ApiModel, Model, Operation, Parameter, ResourceListing, ResponseMessage,
    TopLevelApis, SWAGGER_VERSION,
};
use crate::parser::{FuncDecl, GoParser, ParsedFile};
use crate::scanner::FileScanner;
use crate::schema_generator::SchemaGenerator;
use crate::type_resolver::{ResolvedType, TypeOverrideRegistry, TypeResolver};
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Annotation parser for Go API sources
pub struct GoApiParser {
    search_path: Vec<PathBuf>,
    filter: RouteInclusionFilter,
    overrides: TypeOverrideRegistry,
    listing: ResourceListing,
    apis: TopLevelApis,
}

impl GoApiParser {
    pub fn new(
        search_path: Vec<PathBuf>,
        filter: RouteInclusionFilter,
        overrides: TypeOverrideRegistry,
    ) -> Self {
        Self {
            search_path,
            filter,
            overrides,
            listing: ResourceListing {
                swagger_version: SWAGGER_VERSION.to_string(),
                ..Default::default()
            },
            apis: TopLevelApis::new(),
        }
    }

    /// First `<root>/src/<api_package>` directory on the search path.
    fn locate_package(&self, api_package: &str) -> Result<PathBuf> {
        let mut attempted = PathBuf::from(api_package);
        for root in &self.search_path {
            attempted = root.join("src").join(api_package);
            if attempted.is_dir() {
                debug!("Found package {} at {}", api_package, attempted.display());
                return Ok(attempted);
            }
        }
        Err(Error::Resolution { attempted })
    }

    fn build_operation(
        func: &FuncDecl,
        annotations: &OperationAnnotations,
        method: &str,
        schema_gen: &mut SchemaGenerator,
        models: &mut BTreeMap<String, Model>,
    ) -> Operation {
        let mut operation = Operation {
            http_method: method.to_string(),
            nickname: annotations.title.clone().unwrap_or_else(|| func.name.clone()),
            response_type: "void".to_string(),
            consumes: annotations.accept.iter().map(|a| mime_type(a)).collect(),
            produces: annotations.produce.iter().map(|p| mime_type(p)).collect(),
            ..Default::default()
        };

        match (&annotations.summary, &annotations.description) {
            (Some(summary), description) => {
                operation.summary = summary.clone();
                operation.notes = description.clone().unwrap_or_default();
            }
            (None, Some(description)) => operation.summary = description.clone(),
            (None, None) => {}
        }

        if let Some(success) = annotations.success_type() {
            if let Some(type_name) = &success.type_name {
                let resolved = schema_gen.type_resolver().resolve_type(type_name);
                match success.kind {
                    ResponseKind::Array => {
                        operation.response_type = "array".to_string();
                        operation.items = Some(SchemaGenerator::items_for(&resolved));
                    }
                    ResponseKind::Object => operation.response_type = resolved.type_name(),
                }
                schema_gen.collect_models(type_name, models);
            }
        }

        for param in &annotations.params {
            operation.parameters.push(Self::build_parameter(param, schema_gen, models));
        }

        for response in &annotations.responses {
            let response_model = match &response.type_name {
                Some(type_name) => {
                    schema_gen.collect_models(type_name, models);
                    schema_gen.type_resolver().resolve_type(type_name).type_name()
                }
                None => String::new(),
            };
            operation.response_messages.push(ResponseMessage {
                code: response.code,
                message: response.message.clone(),
                response_model,
            });
        }

        operation
    }

    fn build_parameter(
        param: &ParamAnnotation,
        schema_gen: &mut SchemaGenerator,
        models: &mut BTreeMap<String, Model>,
    ) -> Parameter {
        let resolved = schema_gen.type_resolver().resolve_type(&param.data_type);
        let format = match &resolved {
            ResolvedType::Primitive {
                format: Some(format),
                ..
            } => format.clone(),
            _ => String::new(),
        };
        if matches!(resolved, ResolvedType::Model(_) | ResolvedType::Array(_)) {
            schema_gen.collect_models(&param.data_type, models);
        }
        let data_type = resolved.type_name();
        Parameter {
            param_type: param.param_type.clone(),
            name: param.name.clone(),
            description: param.description.clone(),
            data_type: data_type.clone(),
            param_data_type: data_type,
            format,
            allow_multiple: false,
            required: param.required,
        }
    }

    /// Group for an operation: its `@Resource`, else the first static router
    /// segment, else the receiver type.
    fn group_key(
        func: &FuncDecl,
        annotations: &OperationAnnotations,
        path: &str,
    ) -> Option<ApiGroupKey> {
        if let Some(resource) = &annotations.resource {
            return ApiGroupKey::new(resource).ok();
        }
        let first = path.trim_start_matches('/').split('/').next().unwrap_or_default();
        if !first.is_empty() && !first.starts_with([':', '?', '{']) {
            return ApiGroupKey::new(first).ok();
        }
        func.receiver
            .as_ref()
            .and_then(|receiver| ApiGroupKey::new(&receiver.type_name).ok())
    }

    fn collect_routes(
        &self,
        parsed_files: &[ParsedFile],
        schema_gen: &mut SchemaGenerator,
    ) -> ApiBuilder {
        let mut builder = ApiBuilder::new();
        let mut skipped = 0usize;

        for parsed_file in parsed_files {
            for func in &parsed_file.functions {
                let candidate = match &func.receiver {
                    Some(receiver) => {
                        CandidateRoute::method(&func.name, &receiver.type_name, receiver.is_pointer)
                    }
                    None => CandidateRoute::function(&func.name),
                };
                if !self.filter.is_included(&candidate) {
                    skipped += 1;
                    continue;
                }

                let annotations = OperationAnnotations::parse(&func.doc);
                let Some(router) = &annotations.router else {
                    continue;
                };

                let Some(key) = Self::group_key(func, &annotations, &router.path) else {
                    warn!(
                        "Skipping {} in {}: cannot determine API group for {}",
                        func.name,
                        parsed_file.path.display(),
                        router.path
                    );
                    continue;
                };

                let mut models = BTreeMap::new();
                let operation = Self::build_operation(
                    func,
                    &annotations,
                    router.method.as_str(),
                    schema_gen,
                    &mut models,
                );
                builder.add_operation(key, &router.path, operation, models);
            }
        }

        debug!("Filtered out {} functions", skipped);
        builder
    }
}

impl ApiParser for GoApiParser {
    fn parse_general_api_info(&mut self, path: &Path) -> Result<()> {
        debug!("Parsing general API info from {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        let applied = content
            .lines()
            .filter_map(|line| line.trim().strip_prefix("//"))
            .filter(|comment| apply_general_annotation(&mut self.listing, comment))
            .count();

        debug!("Applied {} general annotations from {}", applied, path.display());
        Ok(())
    }

    fn parse_api(&mut self, api_package: &str) -> Result<()> {
        let package_dir = self.locate_package(api_package)?;

        let scan_result = FileScanner::new(package_dir).scan()?;
        info!("Found {} Go files", scan_result.go_files.len());

        let parsed_files: Vec<ParsedFile> = GoParser::parse_files(&scan_result.go_files)
            .into_iter()
            .filter_map(|r| r.ok())
            .collect();

        let type_resolver = TypeResolver::new(parsed_files.clone(), self.overrides.clone());
        let mut schema_gen = SchemaGenerator::new(type_resolver);

        let builder = self.collect_routes(&parsed_files, &mut schema_gen);
        info!("Found {} API groups", builder.group_count());

        self.apis = builder.build(&self.listing);
        reconcile_listing(&mut self.listing, &self.apis);
        Ok(())
    }

    fn resource_listing(&self) -> &ResourceListing {
        &self.listing
    }

    fn top_level_apis(&self) -> &TopLevelApis {
        &self.apis
    }

    fn into_model(self) -> ApiModel {
        ApiModel::new(self.listing, self.apis)
    }
}

/// Expands short content type names used in `@Accept` / `@Produce`.
fn mime_type(short: &str) -> String {
    match short.to_ascii_lowercase().as_str() {
        "json" => "application/json".to_string(),
        "xml" => "application/xml".to_string(),
        "plain" | "text" => "text/plain".to_string(),
        "html" => "text/html".to_string(),
        "form" => "application/x-www-form-urlencoded".to_string(),
        _ => short.to_string(),
    }
}
