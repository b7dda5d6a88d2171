use std::fmt;

use anyhow::Result;
use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::{
    client::JmaClient,
    cli::create_progress_bar,
    config::Settings,
    error::Error,
    store::Store,
    tables::materialize_forecast,
};

use super::areas::refresh_areas;

/// Outcome of a forecast refresh.
#[derive(Debug)]
pub struct Summary {
    pub fetched: usize,
    pub failed: Vec<String>,
    pub counts: Vec<(&'static str, usize)>,
    pub finished_at: DateTime<Local>,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Fetched {} office(s) at {}",
            self.fetched,
            self.finished_at.format("%Y-%m-%d %H:%M:%S")
        )?;
        if !self.failed.is_empty() {
            writeln!(f, "Skipped: {}", self.failed.join(", "))?;
        }
        for (table, count) in &self.counts {
            writeln!(f, "  {:<24}{:>8}", table, count)?;
        }
        Ok(())
    }
}

/// Refreshes every forecast table from `offices`, or from all stored offices.
pub async fn forecasts(settings: &Settings, offices: &[String]) -> Result<Summary> {
    let client = settings.client()?;
    let mut store = settings.open_store()?;

    refresh_forecasts(&client, &mut store, offices).await
}

/// Refreshes the hierarchy, then the forecasts of every office in it.
pub async fn sync(settings: &Settings) -> Result<Summary> {
    let client = settings.client()?;
    let mut store = settings.open_store()?;

    refresh_areas(&client, &mut store).await?;
    refresh_forecasts(&client, &mut store, &[]).await
}

pub(crate) async fn refresh_forecasts(
    client: &JmaClient,
    store: &mut Store,
    offices: &[String],
) -> Result<Summary> {
    let offices = if offices.is_empty() {
        store.office_codes()?
    } else {
        offices.to_vec()
    };

    if offices.is_empty() {
        return Err(Error::MissingData("no offices stored, run `jma areas` first".to_string()).into());
    }

    let bar = create_progress_bar(offices.len() as u64, "Fetching forecasts".to_string());
    let mut tables = Vec::new();
    let mut fetched = 0;
    let mut failed = Vec::new();

    for office in &offices {
        bar.set_message(format!("Fetching {}", office));

        match client.forecast(office).await {
            Ok(forecast) => {
                tables.extend(materialize_forecast(office, &forecast));
                fetched += 1;
            }
            Err(e) if e.is_per_office() => {
                warn!(office = office.as_str(), error = %e, "Skipping office");
                failed.push(office.clone());
            }
            Err(e) => return Err(e.into()),
        }

        bar.inc(1);
    }

    // Nothing fetched: keep the previous snapshot.
    if fetched == 0 {
        bar.finish_with_message("No forecasts fetched");
        warn!(offices = offices.len(), "Every office failed, keeping stored forecasts");
    } else {
        store.reset_forecasts()?;
        let mut rows = 0;
        for table in &tables {
            rows += store.insert_table(table)?;
        }
        info!(offices = fetched, rows, "Saved forecasts");
        bar.finish_with_message("Forecasts saved");
    }

    Ok(Summary {
        fetched,
        failed,
        counts: store.counts()?,
        finished_at: Local::now(),
    })
}

// -- Tests -------------------------------------------------------------------
