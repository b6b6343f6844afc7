use makaan::{
    FeatureRow, FeatureScaler, HouseInput, LocationEncoder, PredictorError, PricePredictor,
};

fn echo_area_model() -> impl Fn(&FeatureRow) -> Result<f32, PredictorError> + Send + Sync {
    |row: &FeatureRow| Ok(row.get("Area_cleaned").unwrap())
}

#[test]
fn test_builder_requires_a_model() {
    let result = PricePredictor::builder()
        .with_location_encoder(LocationEncoder::from_classes(vec!["Gulberg".to_string()]).unwrap())
        .build();

    assert!(matches!(result, Err(PredictorError::BuildError(_))));
}

#[test]
fn test_builder_requires_a_vocabulary() {
    let result = PricePredictor::builder()
        .with_price_model(|_: &FeatureRow| Ok::<f32, PredictorError>(1.0))
        .build();

    assert!(matches!(result, Err(PredictorError::BuildError(_))));
}

#[test]
fn test_custom_model_rejects_missing_files() {
    let result = PricePredictor::builder().with_custom_model(
        "/no/such/model.onnx",
        "/no/such/locations.json",
        None,
    );

    assert!(result.is_err());
    assert!(matches!(
        result.err(),
        Some(PredictorError::BuildError(_))
    ));
}

#[test]
fn test_custom_model_rejects_empty_paths() {
    assert!(PricePredictor::builder()
        .with_custom_model("", "locations.json", None)
        .is_err());
    assert!(PricePredictor::builder()
        .with_custom_model("model.onnx", "", None)
        .is_err());
    assert!(PricePredictor::builder()
        .with_custom_model("model.onnx", "locations.json", Some(""))
        .is_err());
}

#[test]
fn test_empty_vocabulary_rejected() {
    let result = LocationEncoder::from_classes(vec![]);
    assert!(matches!(result, Err(PredictorError::BuildError(_))));
}

#[test]
fn test_duplicate_locations_rejected() {
    let result = LocationEncoder::from_classes(vec![
        "Gulberg".to_string(),
        "Gulberg".to_string(),
    ]);
    assert!(matches!(result, Err(PredictorError::BuildError(_))));
}

#[test]
fn test_scaler_rejects_flag_and_unknown_columns() {
    // Flag columns are 0/1 and never standardized
    assert!(FeatureScaler::from_params(&[("Gym", 0.5, 0.5)]).is_err());
    // Columns outside the trained schema are a configuration mistake
    assert!(FeatureScaler::from_params(&[("Plot Size", 10.0, 5.0)]).is_err());
}

#[test]
fn test_unparseable_area_flows_through_as_zero() -> Result<(), PredictorError> {
    let predictor = PricePredictor::builder()
        .with_location_encoder(LocationEncoder::from_classes(vec!["Gulberg".to_string()])?)
        .with_price_model(echo_area_model())
        .build()?;

    for area in ["", "three kanal", "12 Acre", "N/A"] {
        let input = HouseInput {
            location: "Gulberg".to_string(),
            area: area.to_string(),
            ..HouseInput::default()
        };
        let prediction = predictor.predict(&input)?;
        assert_eq!(prediction.rupees, 0.0, "area {:?} should normalize to 0", area);
    }
    Ok(())
}

#[test]
fn test_area_units_flow_through_pipeline() -> Result<(), PredictorError> {
    let predictor = PricePredictor::builder()
        .with_location_encoder(LocationEncoder::from_classes(vec!["Gulberg".to_string()])?)
        .with_price_model(echo_area_model())
        .build()?;

    let cases = [
        ("5 Marla", 5.0),
        ("2.5 Kanal", 50.0),
        ("7", 7.0),
        ("  1 Kanal  ", 20.0),
    ];
    for (area, expected_marla) in cases {
        let input = HouseInput {
            location: "Gulberg".to_string(),
            area: area.to_string(),
            ..HouseInput::default()
        };
        let prediction = predictor.predict(&input)?;
        assert_eq!(prediction.rupees, expected_marla, "area {:?}", area);
    }
    Ok(())
}
