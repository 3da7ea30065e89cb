//! Model allow-list. A `ModelId` can only be obtained through
//! `ModelCatalog::resolve`, so every pipeline run carries a vetted model.

use std::fmt;

use anyhow::{bail, Result};
use serde::Serialize;

use crate::errors::AppError;

/// Built-in catalogue: (display name, provider model id).
const DEFAULT_MODELS: &[(&str, &str)] = &[
    ("Gemma 7B", "gemma-7b-it"),
    ("Llama 3.2", "llama3-8b-8192"),
    ("Mixtral 8x7B", "mixtral-8x7b-32768"),
];

/// A provider model identifier that is known to be on the allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelOption {
    pub display_name: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCatalog {
    options: Vec<ModelOption>,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self {
            options: DEFAULT_MODELS
                .iter()
                .map(|(display_name, id)| ModelOption {
                    display_name: display_name.to_string(),
                    id: id.to_string(),
                })
                .collect(),
        }
    }
}

impl ModelCatalog {
    /// Parses an `ALLOWED_MODELS` value: comma-separated entries of either
    /// `Display Name=model-id` or a bare `model-id`.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut options: Vec<ModelOption> = Vec::new();

        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (display_name, id) = match entry.split_once('=') {
                Some((name, id)) => (name.trim(), id.trim()),
                None => (entry, entry),
            };
            if id.is_empty() {
                bail!("Model entry '{entry}' has an empty model id");
            }
            if options.iter().any(|o| o.id == id) {
                continue;
            }
            options.push(ModelOption {
                display_name: display_name.to_string(),
                id: id.to_string(),
            });
        }

        if options.is_empty() {
            bail!("Model allow-list must contain at least one model");
        }
        Ok(Self { options })
    }

    pub fn options(&self) -> &[ModelOption] {
        &self.options
    }

    /// Validates a client-supplied `model_name`. Missing, blank and unknown
    /// names are all validation errors.
    pub fn resolve(&self, model_name: Option<&str>) -> Result<ModelId, AppError> {
        let name = model_name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::Validation("model_name is required".to_string()))?;

        self.options
            .iter()
            .find(|o| o.id == name)
            .map(|o| ModelId(o.id.clone()))
            .ok_or_else(|| AppError::Validation(format!("Invalid model name '{name}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_resolves_known_ids() {
        let catalog = ModelCatalog::default();
        for id in ["gemma-7b-it", "llama3-8b-8192", "mixtral-8x7b-32768"] {
            assert_eq!(catalog.resolve(Some(id)).unwrap().as_str(), id);
        }
    }

    #[test]
    fn test_display_name_is_not_a_model_id() {
        let catalog = ModelCatalog::default();
        assert!(matches!(
            catalog.resolve(Some("Gemma 7B")),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_missing_or_blank_model_is_rejected() {
        let catalog = ModelCatalog::default();
        assert!(matches!(catalog.resolve(None), Err(AppError::Validation(_))));
        assert!(matches!(
            catalog.resolve(Some("   ")),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_parse_mixed_entries() {
        let catalog = ModelCatalog::parse("Llama 3.1=llama-3.1-8b-instant, gemma2-9b-it ,").unwrap();
        assert_eq!(
            catalog.options(),
            &[
                ModelOption {
                    display_name: "Llama 3.1".to_string(),
                    id: "llama-3.1-8b-instant".to_string(),
                },
                ModelOption {
                    display_name: "gemma2-9b-it".to_string(),
                    id: "gemma2-9b-it".to_string(),
                },
            ]
        );
        assert!(catalog.resolve(Some("gemma-7b-it")).is_err());
    }

    #[test]
    fn test_parse_skips_duplicate_ids() {
        let catalog = ModelCatalog::parse("a=x, b=x").unwrap();
        assert_eq!(catalog.options().len(), 1);
        assert_eq!(catalog.options()[0].display_name, "a");
    }

    #[test]
    fn test_parse_rejects_empty_list_and_empty_id() {
        assert!(ModelCatalog::parse(" , ").is_err());
        assert!(ModelCatalog::parse("Name=").is_err());
    }
}
