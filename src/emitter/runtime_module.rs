//! Embeddable Go documentation module (`docs/docs.go`).
//!
//! The generated package carries the resource listing and every API
//! declaration as JSON constants. At startup it registers them with the
//! beego documentation registry, rewriting route paths to `{name}` notation.

use crate::error::Result;
use crate::model::ApiModel;
use crate::serializer::{to_indented_json, write_to_file};
use log::debug;
use std::path::{Path, PathBuf};

// The module is assembled from fixed pieces around the two payloads, so
// payload text is never searched for placeholders.
const MODULE_HEADER: &str = r#"package docs

import (
	"encoding/json"
	"strings"

	"github.com/astaxie/beego"
	"github.com/astaxie/beego/context"
	"github.com/astaxie/beego/swagger"
)

const (
	Rootinfo string = "#;

const MODULE_BETWEEN_PAYLOADS: &str = "\n\tSubapi   string = ";

const MODULE_FOOTER: &str = r#"
)

var BasePath string

var rootapi swagger.ResourceListing
var apilist map[string]*swagger.ApiDeclaration

func init() {
	version := beego.AppConfig.DefaultString("version", "2.0")
	BasePath = "/" + version
	if beego.EnableDocs {
		err := json.Unmarshal([]byte(Rootinfo), &rootapi)
		if err != nil {
			beego.Error(err)
		}
		err = json.Unmarshal([]byte(Subapi), &apilist)
		if err != nil {
			beego.Error(err)
		}
		beego.GlobalDocApi["Root"] = rootapi
		beego.Trace("Load Docs: version", rootapi.ApiVersion)
		for k, v := range apilist {
			for i, a := range v.Apis {
				a.Path = urlReplace(a.Path)
				v.Apis[i] = a
			}
			v.BasePath = BasePath
			beego.GlobalDocApi[strings.Trim(k, "/")] = v
		}
	}
}

// SetupRouter serves the raw documentation under /rawdoc.
func SetupRouter(ns *beego.Namespace) {
	docns := beego.NewNamespace("/rawdoc")
	docns.Get("/", func(ctx *context.Context) {
		ctx.Output.Json(rootapi, false, false)
	})
	for k, v := range apilist {
		vv := v
		docns.Get("/"+strings.Trim(k, "/"), func(ctx *context.Context) {
			ctx.Output.Json(vv, false, false)
		})
	}
	ns.Namespace(docns)
}

func urlReplace(src string) string {
	pt := strings.Split(src, "/")
	for i, p := range pt {
		if len(p) == 0 {
			continue
		}
		if p[0] == ':' {
			pt[i] = "{" + p[1:] + "}"
		} else if len(p) > 1 && p[0] == '?' && p[1] == ':' {
			pt[i] = "{" + p[2:] + "}"
		}
	}
	return strings.Join(pt, "/")
}
"#;

/// Location of the generated module under `output`.
pub fn module_path(output: &Path) -> PathBuf {
    output.join("docs").join("docs.go")
}

/// Renders the Go module source for the model.
pub fn render(model: &ApiModel) -> Result<String> {
    let listing_json = to_indented_json(&model.resource_listing, "resource listing")?;
    let apis_json = to_indented_json(&model.apis, "api descriptions")?;

    Ok(format!(
        "{}{}{}{}{}",
        MODULE_HEADER,
        go_string_literal(&listing_json)?,
        MODULE_BETWEEN_PAYLOADS,
        go_string_literal(&apis_json)?,
        MODULE_FOOTER
    ))
}

/// Writes `<output>/docs/docs.go`.
pub fn generate(model: &ApiModel, output: &Path) -> Result<()> {
    let source = render(model)?;
    let path = module_path(output);
    debug!("Generating Go doc module at {}", path.display());
    write_to_file(&source, &path)
}

/// Quotes text as a Go interpreted string literal.
///
/// JSON string escapes (`\"`, `\\`, `\n`, `\uXXXX`, ...) are a subset of Go's,
/// so the JSON encoding of a string is also a valid Go literal for it.
fn go_string_literal(text: &str) -> Result<String> {
    Ok(serde_json::to_string(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        ApiDeclaration, ApiEntry, ApiGroupKey, ApiRef, Operation, Parameter, ResourceListing,
        TopLevelApis,
    };
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_model() -> ApiModel {
        let mut apis = TopLevelApis::new();
        for (key, path) in [("store", "/store/order/:orderId"), ("pets", "/pets/:id")] {
            apis.insert(
                ApiGroupKey::new(key).unwrap(),
                ApiDeclaration {
                    api_version: "1.0.0".to_string(),
                    swagger_version: "1.2".to_string(),
                    base_path: "/v1".to_string(),
                    resource_path: format!("/{}", key),
                    apis: vec![ApiEntry {
                        path: path.to_string(),
                        description: "has `backticks` and \"quotes\"\n".to_string(),
                        operations: vec![Operation {
                            http_method: "GET".to_string(),
                            nickname: format!("get_{}", key),
                            summary: "C:\\temp\t<tab>".to_string(),
                            parameters: vec![Parameter {
                                param_type: "path".to_string(),
                                name: "id".to_string(),
                                data_type: "integer".to_string(),
                                required: true,
                                ..Default::default()
                            }],
                            ..Default::default()
                        }],
                    }],
                    ..Default::default()
                },
            );
        }
        let listing = ResourceListing {
            api_version: "1.0.0".to_string(),
            swagger_version: "1.2".to_string(),
            base_path: "/v1".to_string(),
            apis: vec![
                ApiRef {
                    path: "/pets".to_string(),
                    description: "Pets `raw`".to_string(),
                },
                ApiRef {
                    path: "/store".to_string(),
                    description: "Store".to_string(),
                },
            ],
            ..Default::default()
        };
        ApiModel::new(listing, apis)
    }

    /// Decodes the Go literal assigned to the named constant.
    fn extract_constant(source: &str, name: &str) -> String {
        let line = source
            .lines()
            .find(|l| l.trim_start().starts_with(name))
            .unwrap_or_else(|| panic!("constant {} not found", name));
        let literal = line.split_once("= ").unwrap().1;
        serde_json::from_str(literal).unwrap()
    }

    #[test]
    fn test_embedded_payloads_round_trip() {
        let model = create_test_model();
        let source = render(&model).unwrap();

        let listing: ResourceListing =
            serde_json::from_str(&extract_constant(&source, "Rootinfo")).unwrap();
        let apis: TopLevelApis =
            serde_json::from_str(&extract_constant(&source, "Subapi")).unwrap();

        assert_eq!(listing, model.resource_listing);
        assert_eq!(apis, model.apis);
    }

    #[test]
    fn test_payloads_never_use_raw_strings() {
        let source = render(&create_test_model()).unwrap();

        let rootinfo = source.lines().find(|l| l.contains("Rootinfo string")).unwrap();
        let subapi = source.lines().find(|l| l.contains("Subapi   string")).unwrap();

        assert!(rootinfo.trim_end().ends_with('"'));
        assert!(subapi.trim_end().ends_with('"'));
        assert!(source.contains("\n)\n\nvar BasePath string\n"));
    }

    #[test]
    fn test_placeholder_like_text_survives_round_trip() {
        let mut model = create_test_model();
        model.resource_listing.info.description =
            "see {{apiDescriptions}} and {{resourceListing}} here".to_string();
        model.resource_listing.info.title = "{{resourceListing}}".to_string();

        let source = render(&model).unwrap();

        let listing: ResourceListing =
            serde_json::from_str(&extract_constant(&source, "Rootinfo")).unwrap();
        let apis: TopLevelApis =
            serde_json::from_str(&extract_constant(&source, "Subapi")).unwrap();
        assert_eq!(listing, model.resource_listing);
        assert_eq!(apis, model.apis);
    }

    #[test]
    fn test_group_payload_is_sorted_by_key() {
        let source = render(&create_test_model()).unwrap();
        let subapi = extract_constant(&source, "Subapi");

        let pets = subapi.find("\"pets\"").unwrap();
        let store = subapi.find("\"store\"").unwrap();
        assert!(pets < store);
        assert!(subapi.starts_with("{\n    \"pets\": {"));
    }

    #[test]
    fn test_raw_paths_are_embedded_unchanged() {
        let source = render(&create_test_model()).unwrap();
        let subapi = extract_constant(&source, "Subapi");

        assert!(subapi.contains("/pets/:id"));
        assert!(!subapi.contains("/pets/{id}"));
    }

    #[test]
    fn test_runtime_path_rewrite_is_bounds_checked() {
        let source = render(&create_test_model()).unwrap();
        assert!(source.contains("len(p) > 1 && p[0] == '?' && p[1] == ':'"));
        assert!(source.contains("beego.GlobalDocApi[strings.Trim(k, \"/\")] = v"));
    }

    #[test]
    fn test_generate_writes_docs_go() {
        let temp_dir = TempDir::new().unwrap();

        generate(&create_test_model(), temp_dir.path()).unwrap();

        let written = fs::read_to_string(temp_dir.path().join("docs/docs.go")).unwrap();
        assert!(written.starts_with("package docs\n"));
        assert_eq!(written, render(&create_test_model()).unwrap());
    }
}
