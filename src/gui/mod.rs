//! Desktop viewer: region → office → sub-area tree beside the stored rows.

pub mod navigator;

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, NaiveDate};
use tracing::{info, warn};

use crate::store::{Store, View};

pub use navigator::Navigator;

pub const TITLE: &str = "地域別天気データ";

const ALL_DATES: &str = "All";

/// Fonts with Japanese glyphs commonly installed on desktop systems.
const SYSTEM_FONTS: [&str; 8] = [
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/fonts-japanese-gothic.ttf",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "C:\\Windows\\Fonts\\meiryo.ttc",
    "C:\\Windows\\Fonts\\msgothic.ttc",
];

const WEEKDAYS: [&str; 7] = ["月", "火", "水", "木", "金", "土", "日"];

/// `2024-12-11` becomes `2024-12-11 (水)`; anything unparsable is shown as is.
fn day_label(day: &str) -> String {
    match NaiveDate::parse_from_str(day, "%Y-%m-%d") {
        Ok(date) => format!("{} ({})", day, WEEKDAYS[date.weekday().num_days_from_monday() as usize]),
        Err(_) => day.to_string(),
    }
}

/// Tree header, bold while its node is on the selection path.
fn header_text(name: &str, selected: bool) -> egui::RichText {
    let text = egui::RichText::new(name);
    if selected {
        text.strong()
    } else {
        text
    }
}

/// The explicit font if given, otherwise the first system font that exists.
fn font_candidate(font: Option<&Path>) -> Option<PathBuf> {
    match font {
        Some(path) => Some(path.to_path_buf()),
        None => SYSTEM_FONTS
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists()),
    }
}

fn install_fonts(ctx: &egui::Context, font: Option<&Path>) -> Result<()> {
    let Some(path) = font_candidate(font) else {
        warn!("No Japanese font found, using the default fonts");
        return Ok(());
    };

    let bytes = fs::read(&path).with_context(|| format!("Failed to read font `{}`", path.display()))?;
    info!(font = %path.display(), "Loaded font");

    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert("jp".to_owned(), Arc::new(egui::FontData::from_owned(bytes)));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts.families.entry(family).or_default().insert(0, "jp".to_owned());
    }
    ctx.set_fonts(fonts);

    Ok(())
}

struct ForecastApp {
    store: Store,
    navigator: Navigator,
    error: Option<String>,
}

impl ForecastApp {
    fn tree(&mut self, ui: &mut egui::Ui) {
        let mut region_click = None;
        let mut office_click = None;
        let mut sub_area_click = None;

        for region in self.navigator.regions() {
            let selected = self.navigator.region() == Some(region.id.as_str());
            let response = egui::CollapsingHeader::new(header_text(&region.name, selected))
                .id_salt(&region.id)
                .show(ui, |ui| {
                    for office in &region.offices {
                        let selected = self.navigator.office() == Some(office.id.as_str());
                        let response = egui::CollapsingHeader::new(header_text(&office.name, selected))
                            .id_salt(&office.id)
                            .show(ui, |ui| {
                                for sub_area in &office.sub_areas {
                                    let selected =
                                        self.navigator.sub_area() == Some(sub_area.id.as_str());
                                    if ui.selectable_label(selected, &sub_area.name).clicked() {
                                        sub_area_click = Some(sub_area.id.clone());
                                    }
                                }
                            });
                        if response.header_response.clicked() {
                            office_click = Some(office.id.clone());
                        }
                    }
                });
            if response.header_response.clicked() {
                region_click = Some(region.id.clone());
            }
        }

        if let Some(id) = region_click {
            self.navigator.select_region(&id);
        }
        if let Some(id) = office_click {
            self.navigator.select_office(&id);
        }
        if let Some(id) = sub_area_click {
            self.navigator.select_sub_area(&id);
        }
    }

    fn selectors(&mut self, ui: &mut egui::Ui) {
        let mut view = self.navigator.view();
        egui::ComboBox::from_label("表示")
            .selected_text(view.label())
            .show_ui(ui, |ui| {
                for option in View::ALL {
                    ui.selectable_value(&mut view, option, option.label());
                }
            });
        self.navigator.select_view(view);

        if !view.has_time() {
            return;
        }

        let mut date = self.navigator.date().map(str::to_string);
        let selected = date.as_deref().map_or_else(|| ALL_DATES.to_string(), day_label);
        egui::ComboBox::from_label("日付")
            .selected_text(selected)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut date, None, ALL_DATES);
                for day in self.navigator.dates() {
                    ui.selectable_value(&mut date, Some(day.clone()), day_label(day));
                }
            });
        self.navigator.select_date(date);
    }

    fn rows(&self, ui: &mut egui::Ui) {
        if let Some(message) = self.navigator.message() {
            ui.label(message);
            return;
        }

        let table = self.navigator.table();
        egui::ScrollArea::both().show(ui, |ui| {
            egui::Grid::new("forecast_rows")
                .striped(true)
                .show(ui, |ui| {
                    for column in &table.columns {
                        ui.strong(*column);
                    }
                    ui.end_row();

                    for row in &table.rows {
                        for value in row {
                            ui.label(value);
                        }
                        ui.end_row();
                    }
                });
        });
    }
}

impl eframe::App for ForecastApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("selectors").show(ctx, |ui| {
            ui.horizontal(|ui| self.selectors(ui));
            if let Some(error) = &self.error {
                ui.colored_label(egui::Color32::RED, error);
            }
        });

        egui::SidePanel::left("regions")
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("region_tree")
                    .show(ui, |ui| self.tree(ui));
            });

        match self.navigator.refresh(&self.store) {
            Ok(true) => self.error = None,
            Ok(false) => {}
            Err(e) => {
                let message = e.to_string();
                if self.error.as_deref() != Some(message.as_str()) {
                    warn!(error = %e, "Query failed");
                    self.error = Some(message);
                }
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| self.rows(ui));
    }
}

/// Opens the viewer on `store` and blocks until the window is closed.
pub fn run(store: Store, font: Option<&Path>) -> Result<()> {
    let navigator = Navigator::load(&store)?;
    let app = ForecastApp {
        store,
        navigator,
        error: None,
    };
    let font = font.map(Path::to_path_buf);

    eframe::run_native(
        TITLE,
        eframe::NativeOptions::default(),
        Box::new(move |cc| {
            if let Err(e) = install_fonts(&cc.egui_ctx, font.as_deref()) {
                warn!(error = %e, "Falling back to the default fonts");
            }
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow!("Viewer failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_label_days_with_weekday() {
        assert_eq!(day_label("2024-12-11"), "2024-12-11 (水)");
        assert_eq!(day_label("2024-12-15"), "2024-12-15 (日)");
        assert_eq!(day_label("不明"), "不明");
    }

    #[test]
    fn should_prefer_explicit_font() {
        let path = Path::new("/tmp/custom-font.ttf");
        assert_eq!(font_candidate(Some(path)), Some(path.to_path_buf()));
    }

    #[test]
    fn should_fail_on_unreadable_font() {
        let ctx = egui::Context::default();
        let err = install_fonts(&ctx, Some(Path::new("/nonexistent/font.ttf"))).unwrap_err();

        assert!(err.to_string().contains("/nonexistent/font.ttf"));
    }
}
