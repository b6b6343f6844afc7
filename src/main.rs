use std::time::Instant;

use clap::{ArgAction, Parser, ValueEnum};
use log::info;
use makaan::{ArtifactStore, BuiltinModel, HouseInput, PricePredictor};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModelChoice {
    /// Random forest regressor, consumes raw feature values
    Forest,
    /// Ridge regressor, standardizes features before inference
    Ridge,
}

impl From<ModelChoice> for BuiltinModel {
    fn from(choice: ModelChoice) -> Self {
        match choice {
            ModelChoice::Forest => BuiltinModel::Forest,
            ModelChoice::Ridge => BuiltinModel::Ridge,
        }
    }
}

/// Estimate Lahore house prices from listing attributes
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Which bundled model to use
    #[arg(long, value_enum, default_value_t = ModelChoice::Forest)]
    model: ModelChoice,

    /// Force a fresh download of the model files
    #[arg(short, long)]
    fresh: bool,

    /// Print the locations the model knows and exit
    #[arg(long)]
    list_locations: bool,

    /// Location of the house, exactly as the model was trained on it
    /// (see --list-locations)
    #[arg(long)]
    location: Option<String>,

    /// Plot area, e.g. "5 Marla", "1 Kanal", or a bare Marla count
    #[arg(long, default_value = "1 Kanal")]
    area: String,

    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u8).range(1..=10))]
    bedrooms: u8,

    #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u8).range(1..=10))]
    bathrooms: u8,

    #[arg(long, default_value_t = 2024, value_parser = clap::value_parser!(u16).range(1960..=2025))]
    built_year: u16,

    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(0..=5))]
    kitchens: u8,

    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=5))]
    store_rooms: u8,

    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=5))]
    servant_quarters: u8,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    furnished: bool,

    #[arg(long, default_value_t = false, action = ArgAction::Set)]
    gym: bool,

    #[arg(long, default_value_t = false, action = ArgAction::Set)]
    study_room: bool,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    drawing_room: bool,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    dining_room: bool,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    lawn_garden: bool,

    #[arg(long, default_value_t = false, action = ArgAction::Set)]
    swimming_pool: bool,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    electricity_backup: bool,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    lounge: bool,
}

impl Args {
    fn house_input(&self, location: String) -> HouseInput {
        HouseInput {
            location,
            area: self.area.clone(),
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            built_year: self.built_year,
            kitchens: self.kitchens,
            store_rooms: self.store_rooms,
            servant_quarters: self.servant_quarters,
            furnished: self.furnished,
            gym: self.gym,
            study_room: self.study_room,
            drawing_room: self.drawing_room,
            dining_room: self.dining_room,
            lawn_garden: self.lawn_garden,
            swimming_pool: self.swimming_pool,
            electricity_backup: self.electricity_backup,
            lounge: self.lounge,
        }
    }
}

async fn ensure_model_downloaded(
    model: BuiltinModel,
    fresh: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = ArtifactStore::new_default()?;

    if fresh {
        info!("Fresh download requested - removing any existing model files...");
        store.remove_download(model)?;
    }

    if !store.is_model_downloaded(model) {
        info!("Downloading model bundle '{}'...", model.name());
        store.download_model(model).await?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let model = BuiltinModel::from(args.model);

    // Ensure model is downloaded before proceeding
    ensure_model_downloaded(model, args.fresh).await?;

    let start_time = Instant::now();
    info!("Building predictor with model '{}'...", model.name());

    let predictor = PricePredictor::builder().with_model(model)?.build()?;

    let build_time = start_time.elapsed();
    info!("Predictor built in {:.2?}", build_time);

    if args.list_locations {
        for location in predictor.locations() {
            println!("{}", location);
        }
        return Ok(());
    }

    let location = match &args.location {
        Some(location) => location.clone(),
        None => {
            eprintln!("No --location given. Pick one with --list-locations.");
            std::process::exit(2);
        }
    };

    let input = args.house_input(location);
    info!("Estimating price for: {:?}", input);

    let predict_start = Instant::now();
    match predictor.predict(&input) {
        Ok(prediction) => {
            println!("Estimated price: {:.2} Crore", prediction.in_crore());
            info!(
                "Prediction took {:.2?} (total {:.2?})",
                predict_start.elapsed(),
                start_time.elapsed()
            );
        }
        Err(e) => {
            eprintln!("Error estimating price: {}", e);
            eprintln!("Consider:");
            eprintln!("  - Checking the location spelling against --list-locations");
            eprintln!("  - Writing the area as \"5 Marla\", \"1 Kanal\", or a bare number");
            return Err(e.into());
        }
    }

    Ok(())
}
