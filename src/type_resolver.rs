use crate::parser::{ParsedFile, StructDecl};
use log::debug;
use std::collections::HashMap;

/// Primitive kind an overridden wrapper type is documented as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    String,
    Int,
    Float,
    Bool,
}

impl PrimitiveKind {
    /// Swagger `(type, format)` for this kind.
    pub fn swagger_type(self) -> (&'static str, Option<&'static str>) {
        match self {
            PrimitiveKind::String => ("string", None),
            PrimitiveKind::Int => ("integer", Some("int64")),
            PrimitiveKind::Float => ("number", Some("double")),
            PrimitiveKind::Bool => ("boolean", None),
        }
    }
}

/// Wrapper types that serialize themselves as a primitive.
///
/// Such types implement their own JSON marshaling, so their struct layout
/// says nothing about their wire form.
#[derive(Debug, Clone)]
pub struct TypeOverrideRegistry {
    overrides: HashMap<String, PrimitiveKind>,
}

impl TypeOverrideRegistry {
    /// An empty registry.
    pub fn empty() -> Self {
        Self {
            overrides: HashMap::new(),
        }
    }

    /// Adds one override, returning the registry for chaining.
    pub fn with_override(mut self, type_name: &str, kind: PrimitiveKind) -> Self {
        self.overrides.insert(type_name.to_string(), kind);
        self
    }

    /// Looks up a type name, ignoring any package qualifier (`sql.NullString`).
    pub fn lookup(&self, type_name: &str) -> Option<PrimitiveKind> {
        let bare = type_name.rsplit('.').next().unwrap_or(type_name);
        self.overrides.get(bare).copied()
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

impl Default for TypeOverrideRegistry {
    /// The `database/sql` nullable wrappers.
    fn default() -> Self {
        Self::empty()
            .with_override("NullString", PrimitiveKind::String)
            .with_override("NullInt64", PrimitiveKind::Int)
            .with_override("NullFloat64", PrimitiveKind::Float)
            .with_override("NullBool", PrimitiveKind::Bool)
    }
}

/// How a Go type expression is documented
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedType {
    /// Swagger primitive with optional format
    Primitive {
        swagger_type: String,
        format: Option<String>,
    },
    /// Slice or array of the inner type
    Array(Box<ResolvedType>),
    /// Reference to a model by its bare type name
    Model(String),
}

impl ResolvedType {
    fn primitive(swagger_type: &str, format: Option<&str>) -> Self {
        ResolvedType::Primitive {
            swagger_type: swagger_type.to_string(),
            format: format.map(str::to_string),
        }
    }

    /// The swagger `type` name; models are referenced by id.
    pub fn type_name(&self) -> String {
        match self {
            ResolvedType::Primitive { swagger_type, .. } => swagger_type.clone(),
            ResolvedType::Array(_) => "array".to_string(),
            ResolvedType::Model(name) => name.clone(),
        }
    }
}

/// Resolves Go type expressions against the structs of the scanned package.
pub struct TypeResolver {
    parsed_files: Vec<ParsedFile>,
    overrides: TypeOverrideRegistry,
}

impl TypeResolver {
    pub fn new(parsed_files: Vec<ParsedFile>, overrides: TypeOverrideRegistry) -> Self {
        debug!(
            "Initializing TypeResolver with {} files and {} type overrides",
            parsed_files.len(),
            overrides.len()
        );
        Self {
            parsed_files,
            overrides,
        }
    }

    /// Find a struct definition by bare or package-qualified name.
    pub fn find_struct_definition(&self, name: &str) -> Option<&StructDecl> {
        let bare = bare_type_name(name);
        for parsed_file in &self.parsed_files {
            if let Some(found) = parsed_file.structs.iter().find(|s| s.name == bare) {
                debug!("Found struct {} in {}", bare, parsed_file.path.display());
                return Some(found);
            }
        }
        debug!("Struct {} not found", bare);
        None
    }

    /// Resolves a type expression such as `[]*models.Pet` or `sql.NullInt64`.
    pub fn resolve_type(&self, type_expr: &str) -> ResolvedType {
        let type_expr = type_expr.trim().trim_start_matches('*');

        if let Some(inner) = type_expr.strip_prefix("[]") {
            if inner == "byte" {
                return ResolvedType::primitive("string", Some("byte"));
            }
            return ResolvedType::Array(Box::new(self.resolve_type(inner)));
        }
        if type_expr.starts_with('[') {
            if let Some(end) = type_expr.find(']') {
                return ResolvedType::Array(Box::new(self.resolve_type(&type_expr[end + 1..])));
            }
        }

        if type_expr.starts_with("map[") {
            return ResolvedType::primitive("object", None);
        }

        if let Some(kind) = self.overrides.lookup(type_expr) {
            let (swagger_type, format) = kind.swagger_type();
            return ResolvedType::primitive(swagger_type, format);
        }

        if let Some(primitive) = Self::parse_primitive_type(type_expr) {
            return primitive;
        }

        ResolvedType::Model(bare_type_name(type_expr).to_string())
    }

    /// Maps Go built-in types to swagger primitives.
    fn parse_primitive_type(type_name: &str) -> Option<ResolvedType> {
        let (swagger_type, format) = match type_name {
            "string" => ("string", None),
            "int" | "int64" | "uint" | "uint64" => ("integer", Some("int64")),
            "int8" | "int16" | "int32" | "uint8" | "uint16" | "uint32" | "rune" => {
                ("integer", Some("int32"))
            }
            "byte" => ("string", Some("byte")),
            "float32" => ("number", Some("float")),
            "float64" => ("number", Some("double")),
            "bool" => ("boolean", None),
            "time.Time" => ("string", Some("date-time")),
            "interface{}" | "any" => ("object", None),
            _ => return None,
        };
        Some(ResolvedType::primitive(swagger_type, format))
    }
}

/// Strips package qualifiers: `my_api.model.OrderRow` → `OrderRow`.
pub fn bare_type_name(name: &str) -> &str {
    let name = name.trim_start_matches('*');
    name.rsplit('.').next().unwrap_or(name)
}
