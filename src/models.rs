use crate::predictor::FEATURE_COLUMNS;

/// The pre-trained Lahore house price models bundled with the library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinModel {
    /// Random forest regressor exported from the training pipeline.
    ///
    /// Characteristics:
    /// - Consumes raw (unscaled) feature rows
    /// - Size: ~12MB
    /// - Best accuracy of the bundled models
    Forest,
    /// Ridge regressor exported from the training pipeline.
    ///
    /// Characteristics:
    /// - Requires standardized feature rows; its bundle ships scaling
    ///   parameters which the builder wires in automatically
    /// - Size: ~1MB
    /// - Fast to download and load
    Ridge,
}

/// Download coordinates and content hashes for one model bundle
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub name: String,
    pub model_url: String,
    pub model_hash: String,
    pub vocabulary_url: String,
    pub vocabulary_hash: String,
    /// Present only for models trained on standardized features
    pub scaler_url: Option<String>,
    pub scaler_hash: Option<String>,
}

/// Characteristics of a model including its capabilities and requirements
#[derive(Debug, Clone)]
pub struct ModelCharacteristics {
    /// Width of the feature row the model consumes
    pub feature_count: usize,
    /// Whether the model expects standardized numeric features
    pub requires_scaling: bool,
    /// Approximate size of the model on disk
    pub model_size_mb: usize,
}

const REPO_BASE: &str = "https://huggingface.co/makaan-ml/lahore-house-price/resolve/main";

impl BuiltinModel {
    /// The bundle name, used as the subdirectory in the artifact store
    pub fn name(&self) -> &'static str {
        match self {
            Self::Forest => "lahore-forest-v1",
            Self::Ridge => "lahore-ridge-v1",
        }
    }

    /// Get the characteristics of the model
    pub fn characteristics(&self) -> ModelCharacteristics {
        match self {
            Self::Forest => ModelCharacteristics {
                feature_count: FEATURE_COLUMNS.len(),
                requires_scaling: false,
                model_size_mb: 12,
            },
            Self::Ridge => ModelCharacteristics {
                feature_count: FEATURE_COLUMNS.len(),
                requires_scaling: true,
                model_size_mb: 1,
            },
        }
    }

    /// Get the download coordinates for the model bundle
    pub fn get_model_info(&self) -> ModelInfo {
        match self {
            Self::Forest => ModelInfo {
                name: self.name().to_string(),
                model_url: format!("{}/forest/model.onnx", REPO_BASE),
                model_hash: "4f64ec6d24e3f2e3933f00356b977468d25db9f530f3d2420b1393ece8ba69aa"
                    .to_string(),
                vocabulary_url: format!("{}/forest/locations.json", REPO_BASE),
                vocabulary_hash:
                    "0de8dc872323ed67d858b7b4bcce8a4a6c8d79852a2294c926d7f1acd09f563e".to_string(),
                scaler_url: None,
                scaler_hash: None,
            },
            Self::Ridge => ModelInfo {
                name: self.name().to_string(),
                model_url: format!("{}/ridge/model.onnx", REPO_BASE),
                model_hash: "45a85232e0c6ff09f805f1509f8aaa15305891ea0e57aece0dd5cb72a1417ea8"
                    .to_string(),
                vocabulary_url: format!("{}/ridge/locations.json", REPO_BASE),
                vocabulary_hash:
                    "55b6ffdee7800ee2f2723f16b30ca49099add8f906610bcfbc04860795a0df32".to_string(),
                scaler_url: Some(format!("{}/ridge/scaler.json", REPO_BASE)),
                scaler_hash: Some(
                    "57b4f5ca19f7149cd24af92980100952af993e9b809babcd6e9b322130a9ad24".to_string(),
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forest_takes_raw_features() {
        let characteristics = BuiltinModel::Forest.characteristics();
        assert!(!characteristics.requires_scaling);
        assert_eq!(characteristics.feature_count, 17);

        let info = BuiltinModel::Forest.get_model_info();
        assert!(info.scaler_url.is_none());
        assert!(info.scaler_hash.is_none());
    }

    #[test]
    fn test_ridge_ships_scaling_parameters() {
        let characteristics = BuiltinModel::Ridge.characteristics();
        assert!(characteristics.requires_scaling);

        let info = BuiltinModel::Ridge.get_model_info();
        assert!(info.scaler_url.is_some());
        assert!(info.scaler_hash.is_some());
    }

    #[test]
    fn test_bundle_names_are_distinct() {
        assert_ne!(BuiltinModel::Forest.name(), BuiltinModel::Ridge.name());
    }
}
