//! A thread-safe house price estimation library for Lahore real estate,
//! backed by ONNX regression models.
//!
//! The library normalizes raw listing attributes (free-form area text,
//! named locations, amenity flags) into the fixed feature row the bundled
//! models were trained on, then runs inference and reports the estimate
//! in rupees with Crore conversion for display.
//!
//! # Basic Usage
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use makaan::{PricePredictor, LocationEncoder, HouseInput, FeatureRow, PredictorError};
//!
//! // Any closure over a feature row can stand in for the model, which
//! // keeps this example free of model files.
//! let predictor = PricePredictor::builder()
//!     .with_location_encoder(LocationEncoder::from_classes(vec![
//!         "DHA Phase 6".to_string(),
//!         "Gulberg".to_string(),
//!     ])?)
//!     .with_price_model(|_: &FeatureRow| Ok::<f32, PredictorError>(35_000_000.0))
//!     .build()?;
//!
//! let input = HouseInput {
//!     location: "Gulberg".to_string(),
//!     area: "1 Kanal".to_string(),
//!     ..HouseInput::default()
//! };
//!
//! let prediction = predictor.predict(&input)?;
//! println!("Estimated price: {:.2} Crore", prediction.in_crore());
//! # Ok(())
//! # }
//! ```
//!
//! With a downloaded model bundle, the builder loads everything from the
//! local artifact store instead:
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use makaan::{PricePredictor, BuiltinModel};
//!
//! let predictor = PricePredictor::builder()
//!     .with_model(BuiltinModel::Forest)?
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The predictor is thread-safe and can be shared across threads using `Arc`:
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use makaan::{PricePredictor, LocationEncoder, HouseInput, FeatureRow, PredictorError};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let predictor = Arc::new(PricePredictor::builder()
//!     .with_location_encoder(LocationEncoder::from_classes(vec![
//!         "Model Town".to_string(),
//!     ])?)
//!     .with_price_model(|_: &FeatureRow| Ok::<f32, PredictorError>(12_000_000.0))
//!     .build()?);
//!
//! let mut handles = vec![];
//! for _ in 0..3 {
//!     let predictor = Arc::clone(&predictor);
//!     handles.push(thread::spawn(move || {
//!         let input = HouseInput {
//!             location: "Model Town".to_string(),
//!             ..HouseInput::default()
//!         };
//!         predictor.predict(&input).unwrap();
//!     }));
//! }
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! # Ok(())
//! # }
//! ```

pub mod artifacts;
pub mod models;
pub mod predictor;
mod runtime;

pub use artifacts::{ArtifactError, ArtifactStore};
pub use models::{BuiltinModel, ModelCharacteristics, ModelInfo};
pub use predictor::{
    parse_area, ColumnScale, FeatureRow, FeatureScaler, HouseInput, LocationEncoder,
    OnnxPriceModel, Prediction, PredictorBuilder, PredictorError, PredictorInfo, PriceModel,
    PricePredictor, FEATURE_COLUMNS, MARLA_PER_KANAL, RUPEES_PER_CRORE, SCALABLE_COLUMNS,
};
pub use runtime::{create_session_builder, RuntimeConfig};

pub fn init_logger() {
    env_logger::init();
}
