use anyhow::{Context, Result};
use tracing::info;

use crate::{client::JmaClient, cli::create_spinner, config::Settings, store::Store};

/// Replaces the stored area hierarchy with a fresh copy.
pub async fn areas(settings: &Settings) -> Result<usize> {
    let client = settings.client()?;
    let mut store = settings.open_store()?;

    refresh_areas(&client, &mut store).await
}

pub(crate) async fn refresh_areas(client: &JmaClient, store: &mut Store) -> Result<usize> {
    let bar = create_spinner("Downloading area hierarchy...".to_string());
    let catalog = client
        .area_catalog()
        .await
        .context("Failed to fetch the area hierarchy")?;
    info!(offices = catalog.office_codes().len(), "Fetched area hierarchy");
    bar.set_message("Saving areas...");

    store.reset_areas()?;
    let count = store.insert_areas(&catalog.paths())?;
    bar.finish_with_message(format!("{} areas saved", count));

    Ok(count)
}

// -- Tests -------------------------------------------------------------------
