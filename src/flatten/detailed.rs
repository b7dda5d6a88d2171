//! Human-readable renderings of a forecast, where gaps show a sentinel.

use std::fmt;

use crate::feed::{forecast::WEEKLY_REPORT, Element, Report};

use super::{flatten_report, ForecastRow};

/// How a missing value is represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    /// Stored as SQL `NULL`.
    Null,
    /// Displayed as "情報なし".
    Sentinel,
}

impl Missing {
    pub const SENTINEL: &'static str = "情報なし";

    pub fn fill(self, value: Option<&str>) -> Option<String> {
        match (self, value) {
            (_, Some(value)) => Some(value.to_string()),
            (Missing::Null, None) => None,
            (Missing::Sentinel, None) => Some(Self::SENTINEL.to_string()),
        }
    }

    fn text(self, value: Option<&str>) -> String {
        self.fill(value).unwrap_or_default()
    }
}

const DETAILED_ELEMENTS: [Element; 7] = [
    Element::WeatherCode,
    Element::Weather,
    Element::Wind,
    Element::Wave,
    Element::Pop,
    Element::Reliability,
    Element::Temp,
];

/// One area at one time, as labelled fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailedEntry {
    pub area_name: String,
    pub fields: Vec<(&'static str, String)>,
}

impl DetailedEntry {
    fn from_row(row: &ForecastRow) -> Self {
        let mut fields = vec![
            ("発表局", row.publishing_office.clone()),
            ("発表日時", row.report_datetime.clone()),
            ("エリア", row.area_name.clone()),
            ("日時", row.time_define.clone()),
        ];
        fields.extend(
            DETAILED_ELEMENTS
                .iter()
                .map(|element| (element.label(), Missing::Sentinel.text(row.value(*element)))),
        );

        DetailedEntry {
            area_name: row.area_name.clone(),
            fields,
        }
    }

    #[cfg(test)]
    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == label)
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Display for DetailedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in &self.fields {
            writeln!(f, "{}: {}", label, value)?;
        }
        Ok(())
    }
}

/// Detailed entries of the first (short-term) report.
pub fn detailed(reports: &[Report]) -> Vec<DetailedEntry> {
    let Some(first) = reports.first() else {
        return Vec::new();
    };

    flatten_report("", 0, first)
        .iter()
        .map(DetailedEntry::from_row)
        .collect()
}

/// Weekly temperature range of one station for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyTemperature {
    pub time_define: String,
    pub min: String,
    pub min_upper: String,
    pub min_lower: String,
    pub max: String,
    pub max_upper: String,
    pub max_lower: String,
}

impl fmt::Display for WeeklyTemperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "日時: {}", self.time_define)?;
        writeln!(
            f,
            "最低気温: {}℃ (上限: {}℃, 下限: {}℃)",
            self.min, self.min_upper, self.min_lower
        )?;
        writeln!(
            f,
            "最高気温: {}℃ (上限: {}℃, 下限: {}℃)",
            self.max, self.max_upper, self.max_lower
        )
    }
}

/// Temperature ranges of the weekly report for the area with `code`.
pub fn weekly_temperatures(reports: &[Report], code: &str) -> Vec<WeeklyTemperature> {
    let Some(weekly) = reports.get(WEEKLY_REPORT) else {
        return Vec::new();
    };

    let text = |row: &ForecastRow, element| Missing::Sentinel.text(row.value(element));

    flatten_report("", WEEKLY_REPORT, weekly)
        .iter()
        .filter(|row| row.area_code == code)
        .map(|row| WeeklyTemperature {
            time_define: row.time_define.clone(),
            min: text(row, Element::TempsMin),
            min_upper: text(row, Element::TempsMinUpper),
            min_lower: text(row, Element::TempsMinLower),
            max: text(row, Element::TempsMax),
            max_upper: text(row, Element::TempsMaxUpper),
            max_lower: text(row, Element::TempsMaxLower),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::forecast::tests::forecast_fixture;

    #[test]
    fn should_fill_missing_values() {
        assert_eq!(Missing::Null.fill(None), None);
        assert_eq!(Missing::Sentinel.fill(None), Some("情報なし".to_string()));
        assert_eq!(Missing::Sentinel.fill(Some("")), Some(String::new()));
        assert_eq!(Missing::Null.fill(Some("10")), Some("10".to_string()));
    }

    #[test]
    fn should_render_first_report_only() {
        let forecast = forecast_fixture();
        let entries = detailed(&forecast);

        assert_eq!(entries.len(), 7);
        assert_eq!(entries[0].get("発表局"), Some("札幌管区気象台"));
        assert_eq!(entries[0].get("天気"), Some("雪"));
        assert_eq!(entries[0].get("波"), Some("３メートル"));
        assert_eq!(entries[1].get("波"), Some("情報なし"));
        assert_eq!(entries[0].get("温度"), Some("情報なし"));
    }

    #[test]
    fn should_display_fields_in_order() {
        let forecast = forecast_fixture();
        let text = detailed(&forecast)[0].to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "発表局: 札幌管区気象台");
        assert_eq!(lines[2], "エリア: 石狩地方");
        assert_eq!(lines[10], "温度: 情報なし");
    }

    #[test]
    fn should_render_nothing_for_empty_feed() {
        assert!(detailed(&[]).is_empty());
        assert!(weekly_temperatures(&[], "14163").is_empty());
    }

    #[test]
    fn should_collect_weekly_temperatures_for_station() {
        let forecast = forecast_fixture();
        let temps = weekly_temperatures(&forecast, "14163");

        assert_eq!(temps.len(), 3);
        assert_eq!(temps[1].min, "-5");
        assert_eq!(temps[1].max_upper, "3");
        assert_eq!(temps[2].max_lower, "情報なし");
        assert!(temps[2].to_string().contains("最高気温: 2℃ (上限: 4℃, 下限: 情報なし℃)"));
    }
}
