use crate::model::{ItemsRef, Model, ModelProperty};
use crate::type_resolver::{ResolvedType, TypeResolver};
use log::{debug, warn};
use std::collections::{BTreeMap, HashSet};

/// Model generator - converts Go structs to swagger models
pub struct SchemaGenerator {
    type_resolver: TypeResolver,
    /// Types already reported as unresolvable
    unresolved: HashSet<String>,
}

impl SchemaGenerator {
    pub fn new(type_resolver: TypeResolver) -> Self {
        debug!("Initializing SchemaGenerator");
        Self {
            type_resolver,
            unresolved: HashSet::new(),
        }
    }

    pub fn type_resolver(&self) -> &TypeResolver {
        &self.type_resolver
    }

    /// Adds the model for `type_expr`, and every model it references, to
    /// `models`. Primitive types add nothing.
    pub fn collect_models(&mut self, type_expr: &str, models: &mut BTreeMap<String, Model>) {
        let resolved = self.type_resolver.resolve_type(type_expr);
        self.collect_resolved(&resolved, models);
    }

    fn collect_resolved(&mut self, resolved: &ResolvedType, models: &mut BTreeMap<String, Model>) {
        match resolved {
            ResolvedType::Primitive { .. } => {}
            ResolvedType::Array(inner) => self.collect_resolved(inner, models),
            ResolvedType::Model(name) => self.generate_struct_model(name, models),
        }
    }

    fn generate_struct_model(&mut self, type_name: &str, models: &mut BTreeMap<String, Model>) {
        if models.contains_key(type_name) {
            debug!("Model for {} already exists", type_name);
            return;
        }

        let Some(struct_def) = self.type_resolver.find_struct_definition(type_name) else {
            if self.unresolved.insert(type_name.to_string()) {
                warn!("Could not resolve type: {}", type_name);
            }
            return;
        };

        debug!("Generating model for: {}", type_name);

        let mut properties = BTreeMap::new();
        let mut required = Vec::new();
        let mut referenced = Vec::new();

        for field in struct_def.fields.iter().filter(|f| !f.skip) {
            let resolved = self.type_resolver.resolve_type(&field.type_expr);
            let mut property = Self::property_for(&resolved);
            property.description = field.description.clone();
            properties.insert(field.wire_name().to_string(), property);

            if !field.omit_empty && !field.type_expr.starts_with('*') {
                required.push(field.wire_name().to_string());
            }
            referenced.push(resolved);
        }

        // Registered before recursing so self-references terminate.
        models.insert(
            type_name.to_string(),
            Model {
                id: type_name.to_string(),
                required,
                properties,
            },
        );

        for resolved in &referenced {
            self.collect_resolved(resolved, models);
        }
    }

    /// Converts a resolved type to a model property.
    pub fn property_for(resolved: &ResolvedType) -> ModelProperty {
        match resolved {
            ResolvedType::Primitive {
                swagger_type,
                format,
            } => ModelProperty {
                property_type: Some(swagger_type.clone()),
                format: format.clone(),
                ..Default::default()
            },
            ResolvedType::Array(inner) => ModelProperty {
                property_type: Some("array".to_string()),
                items: Some(Self::items_for(inner)),
                ..Default::default()
            },
            ResolvedType::Model(name) => ModelProperty {
                reference: Some(name.clone()),
                ..Default::default()
            },
        }
    }

    /// Element description for array types.
    pub fn items_for(inner: &ResolvedType) -> ItemsRef {
        match inner {
            ResolvedType::Model(name) => ItemsRef {
                item_type: None,
                reference: Some(name.clone()),
            },
            other => ItemsRef {
                item_type: Some(other.type_name()),
                reference: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::GoParser;
    use crate::type_resolver::TypeOverrideRegistry;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn create_generator_from_code(code: &str) -> SchemaGenerator {
        let parsed = GoParser::parse_source(Path::new("models.go"), code);
        SchemaGenerator::new(TypeResolver::new(vec![parsed], TypeOverrideRegistry::default()))
    }

    #[test]
    fn test_primitive_adds_no_model() {
        let mut schema_gen = create_generator_from_code("");
        let mut models = BTreeMap::new();
        schema_gen.collect_models("string", &mut models);
        assert!(models.is_empty());
    }

    #[test]
    fn test_struct_model_properties() {
        let mut schema_gen = create_generator_from_code(
            r#"
type Pet struct {
    Id       int64          `json:"id"`
    Name     string         `json:"name,omitempty"` // pet name
    Owner    *User          `json:"owner"`
    Tags     []string       `json:"tags"`
    Nickname sql.NullString `json:"nickname"`
    Hidden   string         `json:"-"`
}
"#,
        );
        let mut models = BTreeMap::new();
        schema_gen.collect_models("models.Pet", &mut models);

        let pet = &models["Pet"];
        assert_eq!(pet.id, "Pet");
        assert_eq!(pet.required, vec!["id", "tags", "nickname"]);
        assert_eq!(pet.properties.len(), 5);
        assert_eq!(pet.properties["id"].property_type.as_deref(), Some("integer"));
        assert_eq!(pet.properties["id"].format.as_deref(), Some("int64"));
        assert_eq!(pet.properties["name"].description, "pet name");
        assert_eq!(pet.properties["owner"].reference.as_deref(), Some("User"));
        assert_eq!(pet.properties["tags"].property_type.as_deref(), Some("array"));
        assert_eq!(
            pet.properties["tags"].items.as_ref().unwrap().item_type.as_deref(),
            Some("string")
        );
        assert_eq!(pet.properties["nickname"].property_type.as_deref(), Some("string"));
        assert!(!pet.properties.contains_key("Hidden"));
    }

    #[test]
    fn test_nested_models_are_collected() {
        let mut schema_gen = create_generator_from_code(
            r#"
type Order struct {
    Items []*OrderItem `json:"items"`
}

type OrderItem struct {
    Sku string `json:"sku"`
}
"#,
        );
        let mut models = BTreeMap::new();
        schema_gen.collect_models("[]Order", &mut models);

        assert_eq!(models.keys().collect::<Vec<_>>(), vec!["Order", "OrderItem"]);
        assert_eq!(
            models["Order"].properties["items"].items.as_ref().unwrap().reference.as_deref(),
            Some("OrderItem")
        );
    }

    #[test]
    fn test_self_reference_terminates() {
        let mut schema_gen = create_generator_from_code(
            "type Node struct {\n    Children []*Node `json:\"children\"`\n}\n",
        );
        let mut models = BTreeMap::new();
        schema_gen.collect_models("Node", &mut models);
        assert_eq!(models.len(), 1);
    }

    #[test]
    fn test_unknown_type_adds_no_model() {
        let mut schema_gen = create_generator_from_code("");
        let mut models = BTreeMap::new();
        schema_gen.collect_models("other.Thing", &mut models);
        assert!(models.is_empty());
    }
}
