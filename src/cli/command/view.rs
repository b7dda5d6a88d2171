use std::path::Path;

use anyhow::Result;

use crate::{config::Settings, gui};

/// Opens the viewer on the configured database.
pub fn view(settings: &Settings, font: Option<&Path>) -> Result<()> {
    let store = settings.open_store()?;
    gui::run(store, font)
}
