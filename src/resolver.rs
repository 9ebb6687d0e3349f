//! Lookup of the main API declaration file across source roots.

use crate::config::RootMatchPolicy;
use crate::error::{Error, Result};
use crate::extractor::ApiParser;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Locates `<root>/src/<main_api_file>` under each search root and feeds
/// every match to the parser's general-info step.
pub struct SourceRootResolver<'a> {
    search_path: &'a [PathBuf],
    policy: RootMatchPolicy,
}

impl<'a> SourceRootResolver<'a> {
    pub fn new(search_path: &'a [PathBuf], policy: RootMatchPolicy) -> Self {
        Self {
            search_path,
            policy,
        }
    }

    /// Parses the main API file from each matching root, in search-path order.
    ///
    /// Returns the files that were parsed.
    ///
    /// # Errors
    ///
    /// Returns a resolution error naming the last attempted path when no root
    /// contains the file, or the first error reported by the parser.
    pub fn resolve<P: ApiParser + ?Sized>(
        &self,
        main_api_file: &str,
        parser: &mut P,
    ) -> Result<Vec<PathBuf>> {
        let mut parsed = Vec::new();
        let mut attempted = None;

        for root in self.search_path {
            let candidate = main_file_path(root, main_api_file);
            debug!("Looking for main API file at {}", candidate.display());

            if candidate.is_file() {
                info!("Parsing general API info from {}", candidate.display());
                parser.parse_general_api_info(&candidate)?;
                parsed.push(candidate);
                if self.policy == RootMatchPolicy::FirstMatch {
                    break;
                }
            } else {
                attempted = Some(candidate);
            }
        }

        if parsed.is_empty() {
            let attempted = attempted.unwrap_or_else(|| PathBuf::from(main_api_file));
            return Err(Error::Resolution { attempted });
        }
        Ok(parsed)
    }
}

fn main_file_path(root: &Path, main_api_file: &str) -> PathBuf {
    root.join("src").join(main_api_file.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ApiModel, ResourceListing, TopLevelApis};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    /// Records every general-info file it is asked to parse.
    #[derive(Default)]
    struct RecordingParser {
        general_files: Vec<PathBuf>,
        listing: ResourceListing,
        apis: TopLevelApis,
    }

    impl ApiParser for RecordingParser {
        fn parse_general_api_info(&mut self, path: &Path) -> Result<()> {
            self.general_files.push(path.to_path_buf());
            self.listing.api_version = fs::read_to_string(path).unwrap();
            Ok(())
        }

        fn parse_api(&mut self, _api_package: &str) -> Result<()> {
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

    fn make_roots(temp_dir: &TempDir, with_file: &[&str]) -> Vec<PathBuf> {
        let roots: Vec<PathBuf> = ["a", "b"].iter().map(|r| temp_dir.path().join(r)).collect();
        for (root, name) in roots.iter().zip(["a", "b"]) {
            fs::create_dir_all(root.join("src/app")).unwrap();
            if with_file.contains(&name) {
                fs::write(root.join("src/app/main.go"), name).unwrap();
            }
        }
        roots
    }

    #[test]
    fn test_file_only_in_second_root() {
        let temp_dir = TempDir::new().unwrap();
        let roots = make_roots(&temp_dir, &["b"]);
        let mut parser = RecordingParser::default();

        let parsed = SourceRootResolver::new(&roots, RootMatchPolicy::EveryMatch)
            .resolve("app/main.go", &mut parser)
            .unwrap();

        assert_eq!(parsed, vec![roots[1].join("src/app/main.go")]);
        assert_eq!(parser.general_files, parsed);
        assert_eq!(parser.resource_listing().api_version, "b");
    }

    #[test]
    fn test_every_match_parses_all_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let roots = make_roots(&temp_dir, &["a", "b"]);
        let mut parser = RecordingParser::default();

        SourceRootResolver::new(&roots, RootMatchPolicy::EveryMatch)
            .resolve("app/main.go", &mut parser)
            .unwrap();

        assert_eq!(
            parser.general_files,
            vec![
                roots[0].join("src/app/main.go"),
                roots[1].join("src/app/main.go")
            ]
        );
        // Last match wins.
        assert_eq!(parser.resource_listing().api_version, "b");
    }

    #[test]
    fn test_first_match_stops_early() {
        let temp_dir = TempDir::new().unwrap();
        let roots = make_roots(&temp_dir, &["a", "b"]);
        let mut parser = RecordingParser::default();

        SourceRootResolver::new(&roots, RootMatchPolicy::FirstMatch)
            .resolve("app/main.go", &mut parser)
            .unwrap();

        assert_eq!(parser.general_files, vec![roots[0].join("src/app/main.go")]);
        assert_eq!(parser.resource_listing().api_version, "a");
    }

    #[test]
    fn test_missing_everywhere_names_last_attempt() {
        let temp_dir = TempDir::new().unwrap();
        let roots = make_roots(&temp_dir, &[]);
        let mut parser = RecordingParser::default();

        let err = SourceRootResolver::new(&roots, RootMatchPolicy::EveryMatch)
            .resolve("app/main.go", &mut parser)
            .unwrap_err();

        match err {
            Error::Resolution { attempted } => {
                assert_eq!(attempted, roots[1].join("src/app/main.go"))
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(parser.general_files.is_empty());
    }

    #[test]
    fn test_directory_with_main_file_name_is_not_a_match() {
        let temp_dir = TempDir::new().unwrap();
        let roots = make_roots(&temp_dir, &[]);
        fs::create_dir_all(roots[0].join("src/app/main.go")).unwrap();
        let mut parser = RecordingParser::default();

        let result = SourceRootResolver::new(&roots, RootMatchPolicy::EveryMatch)
            .resolve("app/main.go", &mut parser);

        assert!(matches!(result, Err(Error::Resolution { .. })));
    }
}
