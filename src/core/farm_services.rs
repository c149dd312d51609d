//! Clients for the Khet.ai backend's non-chat tools: weather lookup, crop
//! recommendation and leaf disease detection.
//!
//! These share the chat transport's HTTP client and error type. Unlike chat,
//! a failure is reported to the caller instead of being folded into a
//! fallback reply.

use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::api::{CropQuery, CropRecommendation, DiseaseReport, WeatherReport};
use crate::core::chat_exchange::{decode_json_reply, ExchangeError};
use crate::core::constants::{CROP_RECOMMEND_PATH, DISEASE_DETECT_PATH, WEATHER_PATH};
use crate::utils::url::construct_api_url;

#[derive(Clone)]
pub struct FarmServicesClient {
    client: reqwest::Client,
    base_url: String,
}

impl FarmServicesClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        construct_api_url(&self.base_url, path)
    }

    /// Looks up current weather. Without a city the backend picks its own
    /// default.
    pub async fn weather(&self, city: Option<&str>) -> Result<WeatherReport, ExchangeError> {
        let url = self.url(WEATHER_PATH);
        debug!(url = %url, city, "requesting weather");

        let mut request = self.client.get(&url);
        if let Some(city) = city {
            request = request.query(&[("city", city)]);
        }
        let response = request.send().await.map_err(ExchangeError::Network)?;
        decode_json_reply(response).await
    }

    pub async fn recommend_crop(
        &self,
        query: &CropQuery,
    ) -> Result<CropRecommendation, ExchangeError> {
        let url = self.url(CROP_RECOMMEND_PATH);
        debug!(url = %url, "requesting crop recommendation");

        let response = self
            .client
            .post(&url)
            .json(query)
            .send()
            .await
            .map_err(ExchangeError::Network)?;
        decode_json_reply(response).await
    }

    /// Uploads an image as the `image` form field.
    pub async fn detect_disease(
        &self,
        file_name: impl Into<String>,
        image: Vec<u8>,
    ) -> Result<DiseaseReport, ExchangeError> {
        let url = self.url(DISEASE_DETECT_PATH);
        debug!(url = %url, bytes = image.len(), "uploading leaf image");

        let part = Part::bytes(image).file_name(file_name.into());
        let form = Form::new().part("image", part);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(ExchangeError::Network)?;
        decode_json_reply(response).await
    }
}
