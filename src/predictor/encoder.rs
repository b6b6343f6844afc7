use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::info;
use serde::Deserialize;

use super::error::PredictorError;

/// On-disk vocabulary artifact: the class list exported by the training
/// pipeline's label encoder, in code order.
#[derive(Debug, Deserialize)]
struct VocabularyFile {
    classes: Vec<String>,
}

/// A fixed bijection between location names and the integer codes the model
/// was trained on.
///
/// Codes are the positions in the artifact's class order (the training
/// exporter emits the classes sorted, so code 0 is the alphabetically first
/// location). The vocabulary is immutable for the process lifetime; unknown
/// names are rejected rather than defaulted so a bad input can never reach
/// the model as a silently wrong code.
///
/// # Example
/// ```
/// use makaan::LocationEncoder;
///
/// let encoder = LocationEncoder::from_classes(vec![
///     "Bahria Town".to_string(),
///     "DHA Phase 6".to_string(),
/// ]).unwrap();
///
/// assert_eq!(encoder.encode("DHA Phase 6").unwrap(), 1);
/// assert_eq!(encoder.decode(1), Some("DHA Phase 6"));
/// assert!(encoder.encode("Nonexistent Town").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct LocationEncoder {
    classes: Vec<String>,
    codes: HashMap<String, u32>,
}

impl LocationEncoder {
    /// Builds an encoder from a class list, assigning codes by position.
    ///
    /// # Errors
    /// Returns a build error when the list is empty, contains an empty name,
    /// or contains duplicates (the mapping must stay a bijection).
    pub fn from_classes(classes: Vec<String>) -> Result<Self, PredictorError> {
        if classes.is_empty() {
            return Err(PredictorError::BuildError(
                "Location vocabulary cannot be empty".to_string(),
            ));
        }

        let mut codes = HashMap::with_capacity(classes.len());
        for (code, name) in classes.iter().enumerate() {
            if name.is_empty() {
                return Err(PredictorError::BuildError(
                    "Location names cannot be empty".to_string(),
                ));
            }
            if codes.insert(name.clone(), code as u32).is_some() {
                return Err(PredictorError::BuildError(format!(
                    "Duplicate location '{}' in vocabulary",
                    name
                )));
            }
        }

        Ok(Self { classes, codes })
    }

    /// Loads the vocabulary artifact (JSON `{"classes": [...]}`) from disk.
    ///
    /// # Errors
    /// Returns a build error when the file is missing, unreadable, or not a
    /// valid vocabulary document.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PredictorError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            PredictorError::BuildError(format!(
                "Failed to read vocabulary file {:?}: {}",
                path, e
            ))
        })?;
        let vocabulary: VocabularyFile = serde_json::from_str(&contents).map_err(|e| {
            PredictorError::BuildError(format!("Invalid vocabulary JSON in {:?}: {}", path, e))
        })?;

        let encoder = Self::from_classes(vocabulary.classes)?;
        info!("Location vocabulary loaded: {} locations", encoder.len());
        Ok(encoder)
    }

    /// Returns the trained integer code for a location name.
    ///
    /// # Errors
    /// Returns [`PredictorError::UnknownLocation`] for names outside the
    /// vocabulary.
    pub fn encode(&self, name: &str) -> Result<u32, PredictorError> {
        self.codes
            .get(name)
            .copied()
            .ok_or_else(|| PredictorError::UnknownLocation(name.to_string()))
    }

    /// Returns the location name for a code, completing the bijection.
    pub fn decode(&self, code: u32) -> Option<&str> {
        self.classes.get(code as usize).map(String::as_str)
    }

    /// The full key set, in code order. Input layers should draw their
    /// picklists from this so unknown-location errors cannot happen by
    /// construction.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn contains(&self, name: &str) -> bool {
        self.codes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
