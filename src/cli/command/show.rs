use std::fmt;

use anyhow::{Context, Result};

use crate::{
    config::Settings,
    error::Error,
    feed::{forecast::WEEKLY_REPORT, Report, UNKNOWN},
    flatten::{averages, detailed, weekly_temperatures, AverageKind, AverageRow, DetailedEntry, WeeklyTemperature},
};

/// Fetches an office live and renders its short-term report.
pub async fn show(settings: &Settings, office: &str, area: Option<&str>) -> Result<Vec<DetailedEntry>> {
    let forecast = settings
        .client()?
        .forecast(office)
        .await
        .with_context(|| format!("Failed to fetch the forecast of office {}", office))?;

    Ok(filter_by_area(detailed(&forecast), area))
}

fn filter_by_area(entries: Vec<DetailedEntry>, area: Option<&str>) -> Vec<DetailedEntry> {
    match area {
        Some(name) => entries
            .into_iter()
            .filter(|entry| entry.area_name.contains(name))
            .collect(),
        None => entries,
    }
}

/// Weekly temperature ranges and climatological normals of one station.
#[derive(Debug)]
pub struct WeeklyOutlook {
    pub code: String,
    pub publishing_office: String,
    pub report_datetime: String,
    pub temperatures: Vec<WeeklyTemperature>,
    pub temp_average: Option<AverageRow>,
    pub precip_average: Option<AverageRow>,
}

impl WeeklyOutlook {
    fn from_reports(reports: &[Report], code: &str) -> Self {
        let average = |kind| {
            reports.get(WEEKLY_REPORT).and_then(|weekly| {
                averages("", WEEKLY_REPORT, weekly, kind)
                    .into_iter()
                    .find(|row| row.area_code == code)
            })
        };

        let (publishing_office, report_datetime) = match reports.get(WEEKLY_REPORT) {
            Some(weekly) => (weekly.publishing_office.clone(), weekly.report_datetime.clone()),
            None => (UNKNOWN.to_string(), UNKNOWN.to_string()),
        };

        Self {
            code: code.to_string(),
            publishing_office,
            report_datetime,
            temperatures: weekly_temperatures(reports, code),
            temp_average: average(AverageKind::Temperature),
            precip_average: average(AverageKind::Precipitation),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.temperatures.is_empty() && self.temp_average.is_none() && self.precip_average.is_none()
    }
}

impl fmt::Display for WeeklyOutlook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "発表局: {}", self.publishing_office)?;
        writeln!(f, "発表日時: {}", self.report_datetime)?;
        writeln!(f, "地域コード: {}", self.code)?;
        for temperature in &self.temperatures {
            writeln!(f, "{}", temperature)?;
        }
        if let Some(average) = &self.temp_average {
            writeln!(
                f,
                "平年気温 ({}): 最低 {}℃ / 最高 {}℃",
                average.area_name, average.min, average.max
            )?;
        }
        if let Some(average) = &self.precip_average {
            writeln!(
                f,
                "平年降水量 ({}): {}mm - {}mm",
                average.area_name, average.min, average.max
            )?;
        }
        Ok(())
    }
}

/// Fetches an office live and collects the weekly outlook for `code`.
pub async fn weekly(settings: &Settings, office: &str, code: &str) -> Result<WeeklyOutlook> {
    let forecast = settings
        .client()?
        .forecast(office)
        .await
        .with_context(|| format!("Failed to fetch the forecast of office {}", office))?;

    let outlook = WeeklyOutlook::from_reports(&forecast, code);
    if outlook.is_empty() {
        return Err(Error::MissingData(format!("no weekly data for area {} in office {}", code, office)).into());
    }

    Ok(outlook)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::feed::forecast::tests::{forecast_fixture, forecast_json};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn settings() -> (MockServer, Settings) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast/data/forecast/016000.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_json()))
            .mount(&server)
            .await;

        let settings = Settings {
            db_path: std::env::temp_dir().join("unused.sqlite"),
            base_url: server.uri(),
            timeout: Duration::from_secs(5),
        };
        (server, settings)
    }

    #[test]
    fn should_filter_entries_by_area_name() {
        let entries = detailed(&forecast_fixture());

        assert_eq!(filter_by_area(entries.clone(), Some("石狩")).len(), 5);
        assert_eq!(filter_by_area(entries.clone(), Some("札幌")).len(), 2);
        assert_eq!(filter_by_area(entries, None).len(), 7);
    }

    #[test]
    fn should_collect_outlook_with_averages() {
        let outlook = WeeklyOutlook::from_reports(&forecast_fixture(), "14163");
        let text = outlook.to_string();

        assert_eq!(outlook.temperatures.len(), 3);
        assert!(text.starts_with("発表局: 札幌管区気象台\n発表日時: 2024-12-10T17:00:00+09:00\n地域コード: 14163\n"));
        assert!(text.contains("平年気温 (札幌): 最低 -4.1℃ / 最高 1.9℃"));
        assert!(text.contains("平年降水量 (札幌): 10.5mm - 25.3mm"));
    }

    #[test]
    fn should_omit_incomplete_averages() {
        let outlook = WeeklyOutlook::from_reports(&forecast_fixture(), "14136");

        assert!(outlook.temperatures.is_empty());
        assert!(outlook.is_empty());

        let outlook = WeeklyOutlook::from_reports(&forecast_fixture()[..1], "14163");
        assert_eq!(outlook.publishing_office, "不明");
    }

    #[tokio::test]
    async fn should_show_live_forecast() {
        let (_server, settings) = settings().await;
        let entries = show(&settings, "016000", Some("札幌")).await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].get("温度"), Some("-4"));
        assert_eq!(entries[0].get("天気"), Some("情報なし"));
    }

    #[tokio::test]
    async fn should_fail_for_unknown_station() {
        let (_server, settings) = settings().await;
        let err = weekly(&settings, "016000", "99999").await.unwrap_err();

        assert!(err.to_string().contains("99999"));
    }

    #[tokio::test]
    async fn should_fail_for_unknown_office() {
        let (_server, settings) = settings().await;
        let err = show(&settings, "999999", None).await.unwrap_err();

        assert!(err.to_string().contains("999999"));
    }
}
