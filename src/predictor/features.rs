use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use super::area::parse_area;
use super::encoder::LocationEncoder;
use super::error::PredictorError;

/// The feature columns the regression models were trained on, in trained
/// order. Both the names and the order are binding: the model consumes the
/// row as a positional vector, so a mismatch here fails silently rather than
/// loudly.
pub const FEATURE_COLUMNS: [&str; 17] = [
    "Location",
    "Bedrooms",
    "Bathrooms",
    "Built Year",
    "Kitchens",
    "Store Rooms",
    "Servant Quarters",
    "Furnished",
    "Gym",
    "Study Room",
    "Drawing Room",
    "Dining Room",
    "Lawn/Garden",
    "Swimming Pool",
    "Electricity Backup",
    "Lounge/Sitting Room",
    "Area_cleaned",
];

/// The numeric columns eligible for standardization. The nine amenity flags
/// are never scaled.
pub const SCALABLE_COLUMNS: [&str; 8] = [
    "Location",
    "Bedrooms",
    "Bathrooms",
    "Built Year",
    "Kitchens",
    "Store Rooms",
    "Servant Quarters",
    "Area_cleaned",
];

lazy_static! {
    static ref COLUMN_INDEX: HashMap<&'static str, usize> = FEATURE_COLUMNS
        .iter()
        .enumerate()
        .map(|(index, name)| (*name, index))
        .collect();
}

/// The raw house attributes collected from the user.
///
/// Range enforcement (bedrooms in 1..=10 and so on) is the input layer's
/// responsibility; this type carries whatever the form validated.
///
/// # Example
/// ```
/// use makaan::HouseInput;
///
/// let input = HouseInput {
///     location: "DHA Phase 6".to_string(),
///     area: "1 Kanal".to_string(),
///     ..HouseInput::default()
/// };
/// assert_eq!(input.bedrooms, 6);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseInput {
    pub location: String,
    pub area: String,
    pub bedrooms: u8,
    pub bathrooms: u8,
    pub built_year: u16,
    pub kitchens: u8,
    pub store_rooms: u8,
    pub servant_quarters: u8,
    pub furnished: bool,
    pub gym: bool,
    pub study_room: bool,
    pub drawing_room: bool,
    pub dining_room: bool,
    pub lawn_garden: bool,
    pub swimming_pool: bool,
    pub electricity_backup: bool,
    pub lounge: bool,
}

impl Default for HouseInput {
    /// The reference form defaults: a furnished 1 Kanal family house.
    fn default() -> Self {
        Self {
            location: String::new(),
            area: "1 Kanal".to_string(),
            bedrooms: 6,
            bathrooms: 7,
            built_year: 2024,
            kitchens: 2,
            store_rooms: 1,
            servant_quarters: 1,
            furnished: true,
            gym: false,
            study_room: false,
            drawing_room: true,
            dining_room: true,
            lawn_garden: true,
            swimming_pool: false,
            electricity_backup: true,
            lounge: true,
        }
    }
}

/// An ordered numeric record matching the trained feature schema.
///
/// Values sit in [`FEATURE_COLUMNS`] order and are handed to the model as a
/// positional vector via [`FeatureRow::as_slice`]. Column-name access exists
/// for the parts of the pipeline (the scaler) that must stay name-keyed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    values: [f32; FEATURE_COLUMNS.len()],
}

impl FeatureRow {
    /// Builds the feature row from raw user input and the location encoder.
    ///
    /// Booleans become 0/1, counts pass through unchanged, the area text goes
    /// through [`parse_area`], and the location string through the encoder.
    /// No other transformation happens at this stage.
    ///
    /// # Errors
    /// Returns [`PredictorError::UnknownLocation`] when the location is not
    /// part of the trained vocabulary.
    pub fn from_input(
        input: &HouseInput,
        encoder: &LocationEncoder,
    ) -> Result<Self, PredictorError> {
        let location = encoder.encode(&input.location)?;
        let values = [
            location as f32,
            f32::from(input.bedrooms),
            f32::from(input.bathrooms),
            f32::from(input.built_year),
            f32::from(input.kitchens),
            f32::from(input.store_rooms),
            f32::from(input.servant_quarters),
            flag(input.furnished),
            flag(input.gym),
            flag(input.study_room),
            flag(input.drawing_room),
            flag(input.dining_room),
            flag(input.lawn_garden),
            flag(input.swimming_pool),
            flag(input.electricity_backup),
            flag(input.lounge),
            parse_area(&input.area),
        ];
        Ok(Self { values })
    }

    /// Wraps values that are already in [`FEATURE_COLUMNS`] order.
    pub fn from_values(values: [f32; FEATURE_COLUMNS.len()]) -> Self {
        Self { values }
    }

    /// Returns the value of a column by name, or `None` for a name outside
    /// the trained schema.
    pub fn get(&self, column: &str) -> Option<f32> {
        COLUMN_INDEX.get(column).map(|&index| self.values[index])
    }

    pub(crate) fn set(&mut self, column: &str, value: f32) {
        if let Some(&index) = COLUMN_INDEX.get(column) {
            self.values[index] = value;
        }
    }

    /// The row as a positional vector in trained column order.
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// The trained column names, in order.
    pub fn columns() -> &'static [&'static str] {
        &FEATURE_COLUMNS
    }

    /// Position of a column within the trained schema.
    pub fn column_index(column: &str) -> Option<usize> {
        COLUMN_INDEX.get(column).copied()
    }
}

fn flag(value: bool) -> f32 {
    if value {
        1.0
    } else {
        0.0
    }
}
