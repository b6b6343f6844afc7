use makaan::{
    FeatureRow, FeatureScaler, HouseInput, LocationEncoder, PredictorError, PricePredictor,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

fn test_encoder() -> LocationEncoder {
    LocationEncoder::from_classes(vec![
        "Bahria Town".to_string(),
        "DHA Phase 6".to_string(),
        "Gulberg".to_string(),
        "Model Town".to_string(),
    ])
    .expect("Failed to build encoder")
}

fn setup_test_predictor(rupees: f32) -> PricePredictor {
    PricePredictor::builder()
        .with_location_encoder(test_encoder())
        .with_price_model(move |_: &FeatureRow| Ok::<f32, PredictorError>(rupees))
        .build()
        .expect("Failed to create predictor")
}

#[test]
fn test_end_to_end_estimate() -> Result<(), Box<dyn std::error::Error>> {
    let predictor = setup_test_predictor(35_000_000.0);

    let input = HouseInput {
        location: "DHA Phase 6".to_string(),
        area: "1 Kanal".to_string(),
        ..HouseInput::default()
    };

    let prediction = predictor.predict(&input)?;
    assert_eq!(
        format!("{:.2} Crore", prediction.in_crore()),
        "3.50 Crore"
    );
    Ok(())
}

#[test]
fn test_default_input_with_known_location() -> Result<(), Box<dyn std::error::Error>> {
    let predictor = setup_test_predictor(12_345_678.0);

    let input = HouseInput {
        location: "Gulberg".to_string(),
        ..HouseInput::default()
    };

    let prediction = predictor.predict(&input)?;
    assert_eq!(prediction.rupees, 12_345_678.0);
    Ok(())
}

#[test]
fn test_unknown_location_aborts_before_model_runs() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_in_model = Arc::clone(&calls);

    let predictor = PricePredictor::builder()
        .with_location_encoder(test_encoder())
        .with_price_model(move |_: &FeatureRow| {
            calls_in_model.fetch_add(1, Ordering::SeqCst);
            Ok::<f32, PredictorError>(1.0)
        })
        .build()
        .unwrap();

    let input = HouseInput {
        location: "Atlantis".to_string(),
        ..HouseInput::default()
    };

    let result = predictor.predict(&input);
    assert!(matches!(result, Err(PredictorError::UnknownLocation(_))));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_empty_location_rejected() {
    let predictor = setup_test_predictor(1.0);
    let input = HouseInput {
        location: "".to_string(),
        ..HouseInput::default()
    };
    assert!(matches!(
        predictor.predict(&input),
        Err(PredictorError::ValidationError(_))
    ));
}

#[test]
fn test_scaling_standardizes_model_input() -> Result<(), Box<dyn std::error::Error>> {
    let seen_areas = Arc::new(Mutex::new(Vec::new()));

    let build = |scaler: Option<FeatureScaler>| {
        let seen = Arc::clone(&seen_areas);
        let mut builder = PricePredictor::builder()
            .with_location_encoder(test_encoder())
            .with_price_model(move |row: &FeatureRow| {
                seen.lock().unwrap().push(row.get("Area_cleaned").unwrap());
                Ok::<f32, PredictorError>(0.0)
            });
        if let Some(scaler) = scaler {
            builder = builder.with_feature_scaler(scaler);
        }
        builder.build()
    };

    let input = HouseInput {
        location: "Bahria Town".to_string(),
        area: "1 Kanal".to_string(),
        ..HouseInput::default()
    };

    // Raw predictor sees the Marla value as-is
    build(None)?.predict(&input)?;
    // Scaled predictor sees (20 - 10) / 5
    let scaler = FeatureScaler::from_params(&[("Area_cleaned", 10.0, 5.0)])?;
    build(Some(scaler))?.predict(&input)?;

    let seen = seen_areas.lock().unwrap();
    assert_eq!(seen.as_slice(), &[20.0, 2.0]);
    Ok(())
}

#[test]
fn test_model_errors_are_surfaced() {
    let predictor = PricePredictor::builder()
        .with_location_encoder(test_encoder())
        .with_price_model(|_: &FeatureRow| {
            Err::<f32, PredictorError>(PredictorError::PredictionError(
                "backend offline".to_string(),
            ))
        })
        .build()
        .unwrap();

    let input = HouseInput {
        location: "Model Town".to_string(),
        ..HouseInput::default()
    };
    assert!(matches!(
        predictor.predict(&input),
        Err(PredictorError::PredictionError(_))
    ));
}

#[test]
fn test_thread_safety() {
    let predictor = Arc::new(setup_test_predictor(9_000_000.0));
    let mut handles = vec![];

    for _ in 0..3 {
        let predictor = Arc::clone(&predictor);
        let handle = thread::spawn(move || {
            let input = HouseInput {
                location: "Bahria Town".to_string(),
                ..HouseInput::default()
            };
            let result = predictor.predict(&input);
            assert!(result.is_ok());
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_predictor_can_move_across_threads() {
    let predictor = setup_test_predictor(1.0);

    thread::spawn(move || {
        let input = HouseInput {
            location: "Gulberg".to_string(),
            ..HouseInput::default()
        };
        predictor.predict(&input).unwrap();
    })
    .join()
    .unwrap();
}

#[test]
fn test_prediction_is_deterministic() -> Result<(), Box<dyn std::error::Error>> {
    // The stub echoes back a feature so repeated calls exercise the full
    // pipeline, not just a constant.
    let predictor = PricePredictor::builder()
        .with_location_encoder(test_encoder())
        .with_price_model(|row: &FeatureRow| {
            Ok::<f32, PredictorError>(row.get("Area_cleaned").unwrap() * 1_000_000.0)
        })
        .build()?;

    let input = HouseInput {
        location: "DHA Phase 6".to_string(),
        area: "5 Marla".to_string(),
        ..HouseInput::default()
    };

    let first = predictor.predict(&input)?;
    let second = predictor.predict(&input)?;
    assert_eq!(first.rupees, second.rupees);
    assert_eq!(first.rupees, 5_000_000.0);
    Ok(())
}
