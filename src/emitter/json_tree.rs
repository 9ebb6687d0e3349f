//! Static swagger 1.2 file tree for swagger-ui.

use crate::error::Result;
use crate::model::ApiModel;
use crate::serializer::{to_indented_json, write_to_file};
use log::info;
use std::path::Path;

const INDEX_FILE: &str = "index.json";

/// Writes `<output>/<key>/index.json` for every group, then `<output>/index.json`.
///
/// The root listing goes last so that a reader never finds a listing whose
/// groups are not on disk yet.
pub fn generate(model: &ApiModel, output: &Path) -> Result<()> {
    for (key, declaration) in &model.apis {
        let json = to_indented_json(declaration, &format!("api declaration {}", key))?;
        let path = output.join(key.to_relative_path()).join(INDEX_FILE);
        write_to_file(&json, &path)?;
        info!("Wrote {}/{}", key, INDEX_FILE);
    }

    let listing = to_indented_json(&model.resource_listing, "resource listing")?;
    write_to_file(&listing, &output.join(INDEX_FILE))?;
    info!("Wrote {}", INDEX_FILE);
    Ok(())
}
