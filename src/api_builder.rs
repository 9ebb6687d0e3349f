use crate::model::{
    ApiDeclaration, ApiEntry, ApiGroupKey, ApiRef, Model, Operation, ResourceListing,
    TopLevelApis, SWAGGER_VERSION,
};
use log::{debug, warn};
use std::collections::BTreeMap;

/// Collects parsed operations into per-group API declarations
#[derive(Debug, Default)]
pub struct ApiBuilder {
    groups: BTreeMap<ApiGroupKey, GroupBuilder>,
}

#[derive(Debug, Default)]
struct GroupBuilder {
    resource_path: String,
    entries: Vec<ApiEntry>,
    models: BTreeMap<String, Model>,
}

impl ApiBuilder {
    pub fn new() -> Self {
        debug!("Initializing ApiBuilder");
        Self::default()
    }

    /// Number of groups seen so far.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Adds an operation on `path` to the group `key`.
    ///
    /// Operations on the same path share one entry, in first-seen order.
    pub fn add_operation(
        &mut self,
        key: ApiGroupKey,
        path: &str,
        operation: Operation,
        models: BTreeMap<String, Model>,
    ) {
        debug!("Adding operation: {} {} to {}", operation.http_method, path, key);

        let group = self.groups.entry(key).or_insert_with_key(|key| GroupBuilder {
            resource_path: format!("/{}", key),
            ..Default::default()
        });

        match group.entries.iter_mut().find(|entry| entry.path == path) {
            Some(entry) => entry.operations.push(operation),
            None => group.entries.push(ApiEntry {
                path: path.to_string(),
                description: String::new(),
                operations: vec![operation],
            }),
        }

        group.models.extend(models);
    }

    /// Builds the declarations, inheriting versions and base path from the listing.
    pub fn build(self, listing: &ResourceListing) -> TopLevelApis {
        debug!("Building {} API declarations", self.groups.len());

        self.groups
            .into_iter()
            .map(|(key, group)| {
                let mut consumes = Vec::new();
                let mut produces = Vec::new();
                for operation in group.entries.iter().flat_map(|e| &e.operations) {
                    merge_unique(&mut consumes, &operation.consumes);
                    merge_unique(&mut produces, &operation.produces);
                }

                let declaration = ApiDeclaration {
                    api_version: listing.api_version.clone(),
                    swagger_version: SWAGGER_VERSION.to_string(),
                    base_path: listing.base_path.clone(),
                    resource_path: group.resource_path,
                    produces,
                    consumes,
                    apis: group.entries,
                    models: group.models,
                };
                (key, declaration)
            })
            .collect()
    }
}

fn merge_unique(target: &mut Vec<String>, values: &[String]) {
    for value in values {
        if !target.contains(value) {
            target.push(value.clone());
        }
    }
}

/// Makes the listing reference exactly the parsed groups.
///
/// Groups without a `@SubApi` reference get one; references to groups that
/// produced no operations are dropped.
pub fn reconcile_listing(listing: &mut ResourceListing, apis: &TopLevelApis) {
    listing.apis.retain(|api_ref| {
        let known = ApiGroupKey::new(&api_ref.path)
            .map(|key| apis.contains_key(&key))
            .unwrap_or(false);
        if !known {
            warn!(
                "Dropping listing reference {} without documented operations",
                api_ref.path
            );
        }
        known
    });

    for key in apis.keys() {
        let referenced = listing
            .apis
            .iter()
            .any(|api_ref| ApiGroupKey::new(&api_ref.path).ok().as_ref() == Some(key));
        if !referenced {
            debug!("Adding listing reference for {}", key);
            listing.apis.push(ApiRef {
                path: format!("/{}", key),
                description: String::new(),
            });
        }
    }
}
