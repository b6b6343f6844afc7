use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use log::info;

use crate::artifacts::ArtifactStore;
use crate::models::BuiltinModel;
use crate::runtime::RuntimeConfig;

use super::encoder::LocationEncoder;
use super::error::PredictorError;
use super::model::{OnnxPriceModel, PriceModel};
use super::price_predictor::PricePredictor;
use super::scaler::FeatureScaler;

/// Path recorded for components supplied in memory rather than loaded from disk.
const IN_MEMORY_PATH: &str = "<in-memory>";

/// Builder for constructing a [`PricePredictor`] with validation.
///
/// Artifacts can come from three places, checked in this order at build time:
/// components handed over directly (`with_location_encoder`, `with_price_model`,
/// `with_feature_scaler`), explicit file paths (`with_custom_model`), or a
/// bundled model resolved through the local artifact store (`with_model`).
///
/// # Example
///
/// ```no_run
/// use makaan::{PricePredictor, BuiltinModel};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let predictor = PricePredictor::builder()
///     .with_model(BuiltinModel::Forest)?
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct PredictorBuilder {
    model_path: Option<String>,
    vocabulary_path: Option<String>,
    scaler_path: Option<String>,
    encoder: Option<LocationEncoder>,
    scaler: Option<FeatureScaler>,
    model: Option<Arc<dyn PriceModel>>,
    runtime_config: RuntimeConfig,
}

impl PredictorBuilder {
    /// Creates a new builder with no artifacts configured
    pub fn new() -> Self {
        Self {
            model_path: None,
            vocabulary_path: None,
            scaler_path: None,
            encoder: None,
            scaler: None,
            model: None,
            runtime_config: RuntimeConfig::default(),
        }
    }

    /// Configures a bundled model by resolving its files in the local
    /// artifact store.
    ///
    /// The model must already be downloaded; see
    /// [`ArtifactStore::download_model`](crate::artifacts::ArtifactStore::download_model)
    /// or run the bundled CLI once to fetch it.
    ///
    /// # Errors
    /// Returns an error when a model was already configured or when the
    /// model files are not present in the store.
    pub fn with_model(mut self, model: BuiltinModel) -> Result<Self, PredictorError> {
        if self.model_path.is_some() {
            return Err(PredictorError::BuildError(
                "Model already configured. with_model and with_custom_model may only be called once".to_string(),
            ));
        }

        let store = ArtifactStore::new_default().map_err(|e| {
            PredictorError::BuildError(format!("Failed to open artifact store: {}", e))
        })?;
        if !store.is_model_downloaded(model) {
            return Err(PredictorError::BuildError(format!(
                "Model '{}' is not downloaded. Download it with ArtifactStore::download_model or by running the makaan_bin CLI once",
                model.name()
            )));
        }

        let model_path = store.get_model_path(model);
        let vocabulary_path = store.get_vocabulary_path(model);
        info!(
            "Using bundled model '{}' from {}",
            model.name(),
            model_path.display()
        );

        self.model_path = Some(model_path.to_string_lossy().to_string());
        self.vocabulary_path = Some(vocabulary_path.to_string_lossy().to_string());
        self.scaler_path = store
            .get_scaler_path(model)
            .map(|path| path.to_string_lossy().to_string());
        Ok(self)
    }

    /// Configures explicit artifact files: an ONNX model, a location
    /// vocabulary, and optionally scaling parameters.
    ///
    /// # Errors
    /// Returns an error when a path is empty, a model was already
    /// configured, or a named file does not exist.
    pub fn with_custom_model(
        mut self,
        model_path: &str,
        vocabulary_path: &str,
        scaler_path: Option<&str>,
    ) -> Result<Self, PredictorError> {
        if model_path.is_empty() {
            return Err(PredictorError::BuildError(
                "Model path cannot be empty".to_string(),
            ));
        }
        if vocabulary_path.is_empty() {
            return Err(PredictorError::BuildError(
                "Vocabulary path cannot be empty".to_string(),
            ));
        }
        if self.model_path.is_some() {
            return Err(PredictorError::BuildError(
                "Model already configured. with_model and with_custom_model may only be called once".to_string(),
            ));
        }
        if !Path::new(model_path).exists() {
            return Err(PredictorError::BuildError(format!(
                "Model file not found: {}",
                model_path
            )));
        }
        if !Path::new(vocabulary_path).exists() {
            return Err(PredictorError::BuildError(format!(
                "Vocabulary file not found: {}",
                vocabulary_path
            )));
        }
        if let Some(scaler_path) = scaler_path {
            if scaler_path.is_empty() {
                return Err(PredictorError::BuildError(
                    "Scaler path cannot be empty".to_string(),
                ));
            }
            if !Path::new(scaler_path).exists() {
                return Err(PredictorError::BuildError(format!(
                    "Scaler file not found: {}",
                    scaler_path
                )));
            }
        }

        self.model_path = Some(model_path.to_string());
        self.vocabulary_path = Some(vocabulary_path.to_string());
        self.scaler_path = scaler_path.map(str::to_string);
        Ok(self)
    }

    /// Sets the ONNX runtime configuration used when loading a model file
    pub fn with_runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.runtime_config = config;
        self
    }

    /// Supplies an already-built location encoder, bypassing vocabulary
    /// file loading
    pub fn with_location_encoder(mut self, encoder: LocationEncoder) -> Self {
        self.encoder = Some(encoder);
        self
    }

    /// Supplies already-built scaling parameters, bypassing scaler file
    /// loading
    pub fn with_feature_scaler(mut self, scaler: FeatureScaler) -> Self {
        self.scaler = Some(scaler);
        self
    }

    /// Supplies the price model directly. Any closure taking a feature row
    /// and returning a rupee estimate works, which keeps tests and callers
    /// with their own inference stack independent of ONNX files.
    ///
    /// Takes precedence over a model file configured on this builder.
    pub fn with_price_model(mut self, model: impl PriceModel + 'static) -> Self {
        self.model = Some(Arc::new(model));
        self
    }

    /// Builds the predictor, loading any artifacts still configured only
    /// as paths.
    ///
    /// # Errors
    /// Returns an error when no vocabulary or no model is configured, or
    /// when loading any artifact file fails.
    pub fn build(self) -> Result<PricePredictor, PredictorError> {
        let vocabulary_path = match (&self.encoder, &self.vocabulary_path) {
            (Some(_), path) => path
                .clone()
                .unwrap_or_else(|| IN_MEMORY_PATH.to_string()),
            (None, Some(path)) => path.clone(),
            (None, None) => {
                return Err(PredictorError::BuildError(
                    "No location vocabulary configured. Call with_model, with_custom_model, or with_location_encoder".to_string(),
                ));
            }
        };
        let encoder = match self.encoder {
            Some(encoder) => encoder,
            None => LocationEncoder::from_file(&vocabulary_path)?,
        };

        let scaler = match (self.scaler, &self.scaler_path) {
            (Some(scaler), _) => Some(scaler),
            (None, Some(path)) => Some(FeatureScaler::from_file(path)?),
            (None, None) => None,
        };

        let (model, model_path): (Arc<dyn PriceModel>, String) = match (self.model, &self.model_path)
        {
            (Some(model), path) => (
                model,
                path.clone().unwrap_or_else(|| IN_MEMORY_PATH.to_string()),
            ),
            (None, Some(path)) => {
                let onnx = OnnxPriceModel::from_file(path, &self.runtime_config)?;
                (Arc::new(onnx), path.clone())
            }
            (None, None) => {
                return Err(PredictorError::BuildError(
                    "No model configured. Call with_model, with_custom_model, or with_price_model".to_string(),
                ));
            }
        };

        info!(
            "Predictor ready: model={}, locations={}, scaling_enabled={}",
            model_path,
            encoder.len(),
            scaler.is_some()
        );

        Ok(PricePredictor {
            model_path,
            vocabulary_path,
            encoder: Arc::new(encoder),
            scaler: scaler.map(Arc::new),
            model,
        })
    }
}

impl Default for PredictorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
