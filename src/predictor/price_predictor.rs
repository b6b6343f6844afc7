use std::fmt;
use std::sync::Arc;

use anyhow::Result;

use super::encoder::LocationEncoder;
use super::error::PredictorError;
use super::features::{FeatureRow, HouseInput, FEATURE_COLUMNS};
use super::model::PriceModel;
use super::scaler::FeatureScaler;

/// Rupees per Crore, the display unit for price estimates.
pub const RUPEES_PER_CRORE: f32 = 10_000_000.0;

/// A price estimate in the model's original currency unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Estimated price in rupees.
    pub rupees: f32,
}

impl Prediction {
    /// The estimate in Crore. No rounding happens here; formatting is the
    /// presentation layer's concern.
    pub fn in_crore(&self) -> f32 {
        self.rupees / RUPEES_PER_CRORE
    }
}

/// A thread-safe house price predictor backed by pre-trained artifacts.
///
/// # Thread Safety
///
/// This type is `Send + Sync` because all of its fields are thread-safe:
/// - `String` is `Send + Sync`
/// - `Arc<T>` provides thread-safe shared ownership
/// - The encoder, scaler, and model are read-only once built and wrapped in `Arc`
///
/// Single-thread usage:
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use makaan::{PricePredictor, LocationEncoder, HouseInput, FeatureRow, PredictorError};
///
/// let predictor = PricePredictor::builder()
///     .with_location_encoder(LocationEncoder::from_classes(vec![
///         "DHA Phase 6".to_string(),
///     ])?)
///     .with_price_model(|_: &FeatureRow| Ok::<f32, PredictorError>(35_000_000.0))
///     .build()?;
///
/// let input = HouseInput {
///     location: "DHA Phase 6".to_string(),
///     ..HouseInput::default()
/// };
/// let prediction = predictor.predict(&input)?;
/// assert_eq!(format!("{:.2} Crore", prediction.in_crore()), "3.50 Crore");
/// # Ok(())
/// # }
/// ```
///
/// Multi-thread usage:
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use makaan::{PricePredictor, LocationEncoder, HouseInput, FeatureRow, PredictorError};
/// use std::sync::Arc;
/// use std::thread;
///
/// let predictor = Arc::new(PricePredictor::builder()
///     .with_location_encoder(LocationEncoder::from_classes(vec![
///         "Model Town".to_string(),
///     ])?)
///     .with_price_model(|_: &FeatureRow| Ok::<f32, PredictorError>(12_000_000.0))
///     .build()?);
///
/// let predictor_clone = Arc::clone(&predictor);
/// thread::spawn(move || {
///     let input = HouseInput {
///         location: "Model Town".to_string(),
///         ..HouseInput::default()
///     };
///     predictor_clone.predict(&input).unwrap();
/// });
/// # Ok(())
/// # }
/// ```
pub struct PricePredictor {
    pub model_path: String,
    pub vocabulary_path: String,
    pub encoder: Arc<LocationEncoder>,
    pub scaler: Option<Arc<FeatureScaler>>,
    pub model: Arc<dyn PriceModel>,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<PricePredictor>();
    }
};

impl fmt::Debug for PricePredictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PricePredictor")
            .field("model_path", &self.model_path)
            .field("vocabulary_path", &self.vocabulary_path)
            .field("num_locations", &self.encoder.len())
            .field("scaling_enabled", &self.scaler.is_some())
            .finish_non_exhaustive()
    }
}

impl PricePredictor {
    /// Creates a new PredictorBuilder for fluent construction
    pub fn builder() -> super::builder::PredictorBuilder {
        super::builder::PredictorBuilder::new()
    }

    /// Returns information about the predictor's current state
    pub fn info(&self) -> super::PredictorInfo {
        super::PredictorInfo {
            model_path: self.model_path.clone(),
            vocabulary_path: self.vocabulary_path.clone(),
            num_locations: self.encoder.len(),
            feature_count: FEATURE_COLUMNS.len(),
            scaling_enabled: self.scaler.is_some(),
        }
    }

    /// The locations the model knows, in code order. Input layers should
    /// present exactly this list.
    pub fn locations(&self) -> &[String] {
        self.encoder.classes()
    }

    /// Estimates the price for one house.
    ///
    /// # Arguments
    /// * `input` - The raw house attributes
    ///
    /// # Returns
    /// A [`Prediction`] carrying the rupee estimate; convert with
    /// [`Prediction::in_crore`] for display.
    ///
    /// # Errors
    /// * [`PredictorError::ValidationError`] when the location is empty
    /// * [`PredictorError::UnknownLocation`] when the location is not in the
    ///   trained vocabulary; the attempt is aborted before the model runs
    /// * [`PredictorError::ModelError`] / [`PredictorError::PredictionError`]
    ///   when the underlying model fails
    pub fn predict(&self, input: &HouseInput) -> Result<Prediction, PredictorError> {
        if input.location.trim().is_empty() {
            return Err(PredictorError::ValidationError(
                "Input location cannot be empty".into(),
            ));
        }

        let row = FeatureRow::from_input(input, &self.encoder)?;
        let row = match &self.scaler {
            Some(scaler) => scaler.transform(&row),
            None => row,
        };

        let rupees = self.model.predict(&row)?;
        Ok(Prediction { rupees })
    }
}
