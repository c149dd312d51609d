use serde::{Deserialize, Serialize};

use crate::core::language::Language;

/// Body posted to the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub language: Language,
}

/// Body returned by the chat endpoint on success.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// Current conditions returned by `GET /api/weather?city=`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub city: String,
    #[serde(default)]
    pub country: String,
    /// Degrees Celsius.
    pub temperature: f64,
    pub description: String,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Kilometres per hour.
    pub wind_speed: f64,
    /// Hectopascals.
    #[serde(default)]
    pub pressure: Option<f64>,
}

/// Soil and climate readings posted to `/api/crop-recommend`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CropQuery {
    #[serde(rename = "N")]
    pub nitrogen: f64,
    #[serde(rename = "P")]
    pub phosphorus: f64,
    #[serde(rename = "K")]
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CropRecommendation {
    #[serde(rename = "recommendedCrop")]
    pub recommended_crop: String,
}

/// Classification returned by `/api/disease-detect` for an uploaded leaf photo.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DiseaseReport {
    pub disease: String,
    /// Model confidence between 0 and 1.
    pub confidence: f64,
    pub description: String,
    pub treatment: String,
}
