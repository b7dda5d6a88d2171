//! HTTP access to the JMA "bosai" JSON endpoints.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::{
    error::{Error, Result},
    feed::{AreaCatalog, Forecast},
};

pub const DEFAULT_BASE_URL: &str = "https://www.jma.go.jp/bosai";

pub struct JmaClient {
    client: reqwest::Client,
    base_url: String,
}

impl JmaClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn area_url(&self) -> String {
        format!("{}/common/const/area.json", self.base_url)
    }

    pub fn forecast_url(&self, office: &str) -> String {
        format!("{}/forecast/data/forecast/{}.json", self.base_url, office)
    }

    /// Fetches the area hierarchy.
    pub async fn area_catalog(&self) -> Result<AreaCatalog> {
        self.get_json(&self.area_url()).await
    }

    /// Fetches the short-term and weekly reports of one office.
    pub async fn forecast(&self, office: &str) -> Result<Forecast> {
        let forecast: Forecast = self.get_json(&self.forecast_url(office)).await?;
        debug!(office, reports = forecast.len(), "Decoded forecast");

        Ok(forecast)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        info!(url, "Fetching");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

// -- Tests -------------------------------------------------------------------
