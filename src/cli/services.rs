//! One-shot commands for the backend's farming tools.

use std::error::Error;
use std::io::{self, Write};
use std::path::Path;

use clap::Args;

use crate::api::{CropQuery, CropRecommendation, DiseaseReport, WeatherReport};
use crate::core::farm_services::FarmServicesClient;

/// Soil and climate readings for `khet-chat crop-recommend`.
#[derive(Debug, Clone, Copy, PartialEq, Args)]
pub struct CropArgs {
    /// Nitrogen content of the soil
    #[arg(short = 'N', long)]
    pub nitrogen: f64,
    /// Phosphorus content of the soil
    #[arg(short = 'P', long)]
    pub phosphorus: f64,
    /// Potassium content of the soil
    #[arg(short = 'K', long)]
    pub potassium: f64,
    /// Temperature in °C
    #[arg(long, allow_negative_numbers = true)]
    pub temperature: f64,
    /// Relative humidity in percent
    #[arg(long)]
    pub humidity: f64,
    /// Soil pH
    #[arg(long)]
    pub ph: f64,
    /// Rainfall in mm
    #[arg(long)]
    pub rainfall: f64,
}

impl From<CropArgs> for CropQuery {
    fn from(args: CropArgs) -> Self {
        CropQuery {
            nitrogen: args.nitrogen,
            phosphorus: args.phosphorus,
            potassium: args.potassium,
            temperature: args.temperature,
            humidity: args.humidity,
            ph: args.ph,
            rainfall: args.rainfall,
        }
    }
}

pub fn format_weather(report: &WeatherReport) -> String {
    let place = if report.country.is_empty() {
        report.city.clone()
    } else {
        format!("{}, {}", report.city, report.country)
    };
    let mut out = format!(
        "{place}: {}\n  Temperature: {:.0}°C\n  Humidity:    {:.0}%\n  Wind:        {:.0} km/h",
        report.description, report.temperature, report.humidity, report.wind_speed
    );
    if let Some(pressure) = report.pressure {
        out.push_str(&format!("\n  Pressure:    {pressure:.0} hPa"));
    }
    out
}

pub fn format_crop(recommendation: &CropRecommendation) -> String {
    format!("Recommended crop: {}", recommendation.recommended_crop)
}

pub fn format_disease(report: &DiseaseReport) -> String {
    format!(
        "{} ({:.0}% confidence)\n  {}\n  Treatment: {}",
        report.disease,
        report.confidence * 100.0,
        report.description,
        report.treatment
    )
}

fn print_block(text: &str) -> Result<(), Box<dyn Error>> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}")?;
    stdout.flush()?;
    Ok(())
}

pub async fn run_weather(
    services: &FarmServicesClient,
    city: Vec<String>,
) -> Result<(), Box<dyn Error>> {
    let city = city.join(" ");
    let city = Some(city.trim()).filter(|c| !c.is_empty());
    let report = services.weather(city).await?;
    print_block(&format_weather(&report))
}

pub async fn run_crop_recommend(
    services: &FarmServicesClient,
    args: CropArgs,
) -> Result<(), Box<dyn Error>> {
    let recommendation = services.recommend_crop(&args.into()).await?;
    print_block(&format_crop(&recommendation))
}

pub async fn run_disease_detect(
    services: &FarmServicesClient,
    image: &Path,
) -> Result<(), Box<dyn Error>> {
    let bytes = std::fs::read(image)
        .map_err(|err| format!("could not read image {}: {err}", image.display()))?;
    let file_name = image
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    let report = services.detect_disease(file_name, bytes).await?;
    print_block(&format_disease(&report))
}
