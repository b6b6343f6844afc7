use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::Deserialize;

use super::error::PredictorError;
use super::features::{FeatureRow, SCALABLE_COLUMNS};

/// Standardization parameters for one column: `scaled = (value - mean) / scale`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ColumnScale {
    pub mean: f32,
    pub scale: f32,
}

/// On-disk scaler artifact: the per-column parameters exported by the
/// training pipeline's standard scaler, keyed by column name.
#[derive(Debug, Deserialize)]
struct ScalerFile {
    columns: Vec<ScalerColumn>,
}

#[derive(Debug, Deserialize)]
struct ScalerColumn {
    name: String,
    mean: f32,
    scale: f32,
}

/// Applies a fixed, externally-trained affine transform to the numeric
/// feature columns before inference.
///
/// Parameters are mapped by column name, never by position, so the artifact
/// and the feature schema cannot drift apart silently. Only the numeric
/// columns in [`SCALABLE_COLUMNS`] are legal targets; the amenity flags pass
/// through untouched. The transform is pure: it neither mutates the scaler
/// nor the input row.
///
/// # Example
/// ```
/// use makaan::{FeatureScaler, FeatureRow};
///
/// let scaler = FeatureScaler::from_params(&[("Bedrooms", 4.0, 2.0)]).unwrap();
/// let row = FeatureRow::from_values([3.0, 6.0, 7.0, 2024.0, 2.0, 1.0, 1.0,
///     1.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0, 20.0]);
///
/// let scaled = scaler.transform(&row);
/// assert_eq!(scaled.get("Bedrooms"), Some(1.0)); // (6 - 4) / 2
/// assert_eq!(scaled.get("Furnished"), Some(1.0)); // untouched
/// ```
#[derive(Debug, Clone)]
pub struct FeatureScaler {
    params: HashMap<String, ColumnScale>,
}

impl FeatureScaler {
    /// Builds a scaler from `(column, mean, scale)` triples.
    ///
    /// # Errors
    /// Returns a build error when a column name is outside the trained
    /// schema, targets an amenity flag, or appears twice.
    pub fn from_params(params: &[(&str, f32, f32)]) -> Result<Self, PredictorError> {
        let mut map = HashMap::with_capacity(params.len());
        for &(name, mean, scale) in params {
            if !SCALABLE_COLUMNS.contains(&name) {
                return Err(PredictorError::BuildError(format!(
                    "Scaler parameter targets '{}', which is not a scalable feature column",
                    name
                )));
            }
            if map.insert(name.to_string(), ColumnScale { mean, scale }).is_some() {
                return Err(PredictorError::BuildError(format!(
                    "Duplicate scaler parameters for column '{}'",
                    name
                )));
            }
        }

        if map.len() < SCALABLE_COLUMNS.len() {
            warn!(
                "Scaler covers {} of {} numeric columns; uncovered columns pass through unscaled",
                map.len(),
                SCALABLE_COLUMNS.len()
            );
        }

        Ok(Self { params: map })
    }

    /// Loads the scaler artifact (JSON `{"columns": [...]}`) from disk.
    ///
    /// # Errors
    /// Returns a build error when the file is missing, unreadable, not a
    /// valid scaler document, or names columns outside the trained schema.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PredictorError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            PredictorError::BuildError(format!("Failed to read scaler file {:?}: {}", path, e))
        })?;
        let file: ScalerFile = serde_json::from_str(&contents).map_err(|e| {
            PredictorError::BuildError(format!("Invalid scaler JSON in {:?}: {}", path, e))
        })?;

        let params: Vec<(&str, f32, f32)> = file
            .columns
            .iter()
            .map(|column| (column.name.as_str(), column.mean, column.scale))
            .collect();
        let scaler = Self::from_params(&params)?;
        info!("Feature scaler loaded: {} columns", scaler.len());
        Ok(scaler)
    }

    /// Returns a new row with the parameterized columns standardized and all
    /// other columns carried over unchanged.
    ///
    /// A near-zero scale leaves the centered value undivided, matching how
    /// zero-variance columns behave at training time.
    pub fn transform(&self, row: &FeatureRow) -> FeatureRow {
        let mut scaled = row.clone();
        for (column, params) in &self.params {
            if let Some(value) = scaled.get(column) {
                let mut centered = value - params.mean;
                if params.scale > 1e-10 {
                    centered /= params.scale;
                }
                scaled.set(column, centered);
            }
        }
        scaled
    }

    /// Number of columns this scaler standardizes.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample_row() -> FeatureRow {
        FeatureRow::from_values([
            2.0, 6.0, 7.0, 2024.0, 2.0, 1.0, 1.0, // numerics
            1.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 1.0, // flags
            1.0, 20.0,
        ])
    }

    fn full_scaler() -> FeatureScaler {
        FeatureScaler::from_params(&[
            ("Location", 1.0, 2.0),
            ("Bedrooms", 4.0, 2.0),
            ("Bathrooms", 5.0, 1.0),
            ("Built Year", 2000.0, 16.0),
            ("Kitchens", 1.0, 0.5),
            ("Store Rooms", 1.0, 1.0),
            ("Servant Quarters", 0.0, 1.0),
            ("Area_cleaned", 10.0, 5.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_affine_transform_per_column() {
        let scaled = full_scaler().transform(&sample_row());

        assert_eq!(scaled.get("Location"), Some(0.5)); // (2 - 1) / 2
        assert_eq!(scaled.get("Bedrooms"), Some(1.0)); // (6 - 4) / 2
        assert_eq!(scaled.get("Built Year"), Some(1.5)); // (2024 - 2000) / 16
        assert_eq!(scaled.get("Area_cleaned"), Some(2.0)); // (20 - 10) / 5
    }

    #[test]
    fn test_amenity_flags_pass_through() {
        let row = sample_row();
        let scaled = full_scaler().transform(&row);

        for column in [
            "Furnished",
            "Gym",
            "Study Room",
            "Drawing Room",
            "Dining Room",
            "Lawn/Garden",
            "Swimming Pool",
            "Electricity Backup",
            "Lounge/Sitting Room",
        ] {
            assert_eq!(scaled.get(column), row.get(column), "{} changed", column);
        }
    }

    #[test]
    fn test_transform_is_deterministic() {
        let scaler = full_scaler();
        let row = sample_row();
        assert_eq!(scaler.transform(&row), scaler.transform(&row));
        // The input row is untouched.
        assert_eq!(row, sample_row());
    }

    #[test]
    fn test_zero_scale_leaves_centered_value() {
        let scaler = FeatureScaler::from_params(&[("Bedrooms", 4.0, 0.0)]).unwrap();
        let scaled = scaler.transform(&sample_row());
        assert_eq!(scaled.get("Bedrooms"), Some(2.0)); // centered only
    }

    #[test]
    fn test_unknown_column_rejected() {
        let result = FeatureScaler::from_params(&[("Garage", 0.0, 1.0)]);
        assert!(matches!(result, Err(PredictorError::BuildError(_))));
    }

    #[test]
    fn test_flag_column_rejected() {
        let result = FeatureScaler::from_params(&[("Furnished", 0.0, 1.0)]);
        assert!(matches!(result, Err(PredictorError::BuildError(_))));
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let result =
            FeatureScaler::from_params(&[("Bedrooms", 0.0, 1.0), ("Bedrooms", 1.0, 2.0)]);
        assert!(matches!(result, Err(PredictorError::BuildError(_))));
    }

    #[test]
    fn test_partial_coverage_is_allowed() {
        let scaler = FeatureScaler::from_params(&[("Area_cleaned", 10.0, 5.0)]).unwrap();
        let scaled = scaler.transform(&sample_row());
        assert_eq!(scaled.get("Area_cleaned"), Some(2.0));
        assert_eq!(scaled.get("Bedrooms"), Some(6.0)); // uncovered, unscaled
    }

    #[test]
    fn test_from_file_round_trip() {
        let path = std::env::temp_dir().join("makaan-test-scaler.json");
        fs::write(
            &path,
            r#"{"columns": [{"name": "Bedrooms", "mean": 4.0, "scale": 2.0}]}"#,
        )
        .unwrap();

        let scaler = FeatureScaler::from_file(&path).unwrap();
        assert_eq!(scaler.len(), 1);
        let scaled = scaler.transform(&sample_row());
        assert_eq!(scaled.get("Bedrooms"), Some(1.0));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_from_file_rejects_unknown_columns() {
        let path = std::env::temp_dir().join("makaan-test-scaler-bad.json");
        fs::write(
            &path,
            r#"{"columns": [{"name": "Garage", "mean": 0.0, "scale": 1.0}]}"#,
        )
        .unwrap();

        let result = FeatureScaler::from_file(&path);
        assert!(matches!(result, Err(PredictorError::BuildError(_))));

        fs::remove_file(&path).unwrap();
    }
}
