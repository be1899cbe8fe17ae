//! Loads rule tables from `rules.json` in the config directory, falling back to
//! the built-in seed.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::domain::{RuleBook, RuleBookError, RuleOrigin};
use crate::util::persistence::config_dir;

const RULES_FILENAME: &str = "rules.json";

#[derive(Debug, Error)]
pub enum RuleSourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Serde {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("rules in {path} are invalid: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: RuleBookError,
    },
}

/// Outcome of a rule load. `warning` is set when a file existed but could not be used.
#[derive(Debug)]
pub struct LoadedRules {
    pub rules: RuleBook,
    pub origin: RuleOrigin,
    pub warning: Option<RuleSourceError>,
}

pub fn rules_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(RULES_FILENAME))
}

pub fn load_rules() -> LoadedRules {
    match rules_path() {
        Some(path) => load_rules_from(&path),
        None => {
            tracing::warn!("no config directory available; using built-in rule tables");
            built_in(None)
        }
    }
}

pub fn load_rules_from(path: &Path) -> LoadedRules {
    if !path.exists() {
        tracing::info!(path = %path.display(), "no rule file found; using built-in rule tables");
        return built_in(None);
    }

    match read_rule_file(path) {
        Ok(rules) => {
            tracing::info!(
                path = %path.display(),
                countries = rules.countries.len(),
                hs_codes = rules.hs_codes.len(),
                "loaded rule tables"
            );
            LoadedRules {
                rules,
                origin: RuleOrigin::ConfigFile,
                warning: None,
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "falling back to built-in rule tables");
            built_in(Some(err))
        }
    }
}

/// Reads and validates a rule file without any fallback.
pub fn read_rule_file(path: &Path) -> Result<RuleBook, RuleSourceError> {
    let content = fs::read_to_string(path).map_err(|source| RuleSourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rules: RuleBook =
        serde_json::from_str(&content).map_err(|source| RuleSourceError::Serde {
            path: path.to_path_buf(),
            source,
        })?;
    rules.validate().map_err(|source| RuleSourceError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(rules)
}

/// Writes the built-in tables as a starting point for local edits.
pub fn write_rule_template(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(&RuleBook::default())?;
    fs::write(path, content)?;
    tracing::info!(path = %path.display(), "wrote rule template");
    Ok(())
}

fn built_in(warning: Option<RuleSourceError>) -> LoadedRules {
    LoadedRules {
        rules: RuleBook::default(),
        origin: RuleOrigin::BuiltIn,
        warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_uses_seed_without_warning() {
        let dir = tempfile::tempdir().expect("tempdir");
        let loaded = load_rules_from(&dir.path().join(RULES_FILENAME));

        assert_eq!(loaded.origin, RuleOrigin::BuiltIn);
        assert_eq!(loaded.rules, RuleBook::default());
        assert!(loaded.warning.is_none());
    }

    #[test]
    fn template_round_trips_through_loader() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join(RULES_FILENAME);
        write_rule_template(&path).expect("template written");

        let loaded = load_rules_from(&path);
        assert_eq!(loaded.origin, RuleOrigin::ConfigFile);
        assert_eq!(loaded.rules, RuleBook::default());
        assert!(loaded.warning.is_none());
    }

    #[test]
    fn malformed_file_falls_back_with_warning() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(RULES_FILENAME);
        fs::write(&path, "{ not json").expect("write");

        let loaded = load_rules_from(&path);
        assert_eq!(loaded.origin, RuleOrigin::BuiltIn);
        assert!(matches!(loaded.warning, Some(RuleSourceError::Serde { .. })));
    }

    #[test]
    fn duplicate_codes_are_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(RULES_FILENAME);
        let mut book = RuleBook::default();
        book.countries.push(book.countries[0].clone());
        fs::write(&path, serde_json::to_string(&book).expect("serialize")).expect("write");

        match read_rule_file(&path) {
            Err(RuleSourceError::Invalid { source, .. }) => {
                assert_eq!(source, RuleBookError::DuplicateCountry("USA".into()));
            }
            other => panic!("expected invalid rules, got {other:?}"),
        }
    }
}
