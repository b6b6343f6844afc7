use std::collections::HashMap;
use std::path::Path;

use log::info;
use ndarray::Array2;
use ort::session::Session;
use ort::value::Tensor;

use super::error::PredictorError;
use super::features::FeatureRow;
use crate::runtime::{create_session_builder, RuntimeConfig};

/// The opaque prediction capability behind the pipeline.
///
/// The regression model's internals are out of scope here: anything that can
/// turn a finished feature row into a rupee estimate satisfies the contract,
/// whether it is an exported ONNX ensemble, a linear model, or a plain
/// closure substituted in tests.
pub trait PriceModel: Send + Sync {
    /// Returns the estimated price in rupees for a feature row.
    fn predict(&self, row: &FeatureRow) -> Result<f32, PredictorError>;
}

impl<F> PriceModel for F
where
    F: Fn(&FeatureRow) -> Result<f32, PredictorError> + Send + Sync,
{
    fn predict(&self, row: &FeatureRow) -> Result<f32, PredictorError> {
        self(row)
    }
}

/// A pre-trained regression model exported to ONNX.
///
/// The graph is expected to:
/// - Accept one input: the feature vector, shape `[batch_size, 17]`, f32
/// - Output the price estimate in rupees, one f32 per batch row
///
/// The input tensor name is read from the graph at load time rather than
/// hard-coded, since exporters disagree on it (`float_input`, `X`, ...).
#[derive(Debug)]
pub struct OnnxPriceModel {
    session: Session,
    input_name: String,
}

impl OnnxPriceModel {
    /// Loads the model from an ONNX file using the shared runtime
    /// environment.
    ///
    /// # Errors
    /// Returns a build error when the session cannot be created and a model
    /// error when the graph structure is not the expected regressor shape.
    pub fn from_file<P: AsRef<Path>>(
        path: P,
        config: &RuntimeConfig,
    ) -> Result<Self, PredictorError> {
        let session = create_session_builder(config)?.commit_from_file(path.as_ref())?;

        Self::validate_model(&session)?;
        info!("Model structure validated successfully");

        let input_name = session.inputs[0].name.clone();
        Ok(Self {
            session,
            input_name,
        })
    }

    /// Validates that the model has the expected input/output structure
    fn validate_model(session: &Session) -> Result<(), PredictorError> {
        let inputs = &session.inputs;
        if inputs.len() != 1 {
            return Err(PredictorError::ModelError(format!(
                "Model must have exactly 1 input (the feature vector), found {}",
                inputs.len()
            )));
        }

        let outputs = &session.outputs;
        if outputs.is_empty() {
            return Err(PredictorError::ModelError(
                "Model must have at least 1 output for the price estimate".to_string(),
            ));
        }

        Ok(())
    }
}

impl PriceModel for OnnxPriceModel {
    fn predict(&self, row: &FeatureRow) -> Result<f32, PredictorError> {
        let values = row.as_slice();
        let input_array = Array2::from_shape_vec((1, values.len()), values.to_vec())
            .map_err(|e| PredictorError::ModelError(format!("Failed to create input array: {}", e)))?;
        let input_dyn = input_array.into_dyn();
        let features = input_dyn.as_standard_layout();

        let mut input_tensors = HashMap::new();
        input_tensors.insert(
            self.input_name.as_str(),
            Tensor::from_array(&features).map_err(|e| {
                PredictorError::ModelError(format!("Failed to create input tensor: {}", e))
            })?,
        );

        let outputs = self
            .session
            .run(input_tensors)
            .map_err(|e| PredictorError::ModelError(format!("Failed to run model: {}", e)))?;
        let output_tensor = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| {
                PredictorError::ModelError(format!("Failed to extract output tensor: {}", e))
            })?;

        output_tensor.iter().copied().next().ok_or_else(|| {
            PredictorError::ModelError("Model returned an empty output tensor".to_string())
        })
    }
}
