//! Typed feature pipeline and prediction API for Lahore house listings.
//!
//! The pipeline turns a [`HouseInput`] into a fixed-order [`FeatureRow`]
//! (area normalization, location encoding, flag conversion), optionally
//! applies standardization, and hands the row to a [`PriceModel`].

mod area;
mod builder;
mod encoder;
mod error;
mod features;
mod model;
mod price_predictor;
mod scaler;

pub use area::{parse_area, MARLA_PER_KANAL};
pub use builder::PredictorBuilder;
pub use encoder::LocationEncoder;
pub use error::PredictorError;
pub use features::{FeatureRow, HouseInput, FEATURE_COLUMNS, SCALABLE_COLUMNS};
pub use model::{OnnxPriceModel, PriceModel};
pub use price_predictor::{Prediction, PricePredictor, RUPEES_PER_CRORE};
pub use scaler::{ColumnScale, FeatureScaler};

/// Information about a predictor's configuration
#[derive(Debug, Clone)]
pub struct PredictorInfo {
    /// Path to the ONNX model file, or `<in-memory>` for direct components
    pub model_path: String,
    /// Path to the location vocabulary file, or `<in-memory>`
    pub vocabulary_path: String,
    /// Number of locations in the trained vocabulary
    pub num_locations: usize,
    /// Width of the feature row the model consumes
    pub feature_count: usize,
    /// Whether standardization runs before inference
    pub scaling_enabled: bool,
}
