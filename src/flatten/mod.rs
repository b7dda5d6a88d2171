//! Reshapes the ragged per-area arrays of a forecast into flat rows.
//!
//! Every array of an area is padded to a common width and then read at each
//! index of the series' `timeDefines`, so a short array simply yields `None`
//! for the trailing positions.

pub mod detailed;

use std::iter;

use tracing::{debug, error};

use crate::feed::{Element, Report};

pub use detailed::{detailed, weekly_temperatures, DetailedEntry, Missing, WeeklyTemperature};

/// Pads `values` with `None` up to `len`, truncating anything longer.
pub fn pad<T: Clone>(values: &[Option<T>], len: usize) -> Vec<Option<T>> {
    values
        .iter()
        .cloned()
        .chain(iter::repeat(None))
        .take(len)
        .collect()
}

/// One area at one point of a time series.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRow {
    /// Office whose feed produced the row.
    pub feed_office: String,
    /// Position of the source report in the feed.
    pub report_index: usize,
    pub publishing_office: String,
    pub report_datetime: String,
    pub area_name: String,
    pub area_code: String,
    pub time_define: String,
    values: [Option<String>; Element::COUNT],
}

impl ForecastRow {
    pub fn value(&self, element: Element) -> Option<&str> {
        self.values[element.index()].as_deref()
    }
}

/// Flattens every series of one report.
pub fn flatten_report(feed_office: &str, report_index: usize, report: &Report) -> Vec<ForecastRow> {
    if report.time_series.is_empty() {
        error!(office = feed_office, report = report_index, "'timeSeries' not found");
        return Vec::new();
    }

    let mut rows = Vec::new();

    for series in &report.time_series {
        for area in &series.areas {
            let width = Element::ALL
                .iter()
                .map(|element| element.values(area).len())
                .chain(iter::once(series.time_defines.len()))
                .max()
                .unwrap_or(0);

            for element in Element::ALL {
                let len = element.values(area).len();
                if len != 0 && len != series.time_defines.len() {
                    debug!(
                        area = area.area.code.as_str(),
                        element = element.key(),
                        len,
                        times = series.time_defines.len(),
                        "Ragged array"
                    );
                }
            }

            let columns: Vec<Vec<Option<String>>> = Element::ALL
                .iter()
                .map(|element| pad(element.values(area), width))
                .collect();

            for (idx, time_define) in series.time_defines.iter().enumerate() {
                rows.push(ForecastRow {
                    feed_office: feed_office.to_string(),
                    report_index,
                    publishing_office: report.publishing_office.clone(),
                    report_datetime: report.report_datetime.clone(),
                    area_name: area.area.name.clone(),
                    area_code: area.area.code.clone(),
                    time_define: time_define.clone(),
                    values: std::array::from_fn(|element| columns[element][idx].clone()),
                });
            }
        }
    }

    debug!(office = feed_office, report = report_index, rows = rows.len(), "Flattened report");

    rows
}

/// Flattens all reports of a forecast.
pub fn flatten_forecast(feed_office: &str, reports: &[Report]) -> Vec<ForecastRow> {
    reports
        .iter()
        .enumerate()
        .flat_map(|(index, report)| flatten_report(feed_office, index, report))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AverageKind {
    Temperature,
    Precipitation,
}

/// A climatological normal for one station, taken from the weekly report.
#[derive(Debug, Clone, PartialEq)]
pub struct AverageRow {
    pub feed_office: String,
    pub report_index: usize,
    pub kind: AverageKind,
    pub publishing_office: String,
    pub report_datetime: String,
    pub area_name: String,
    pub area_code: String,
    pub min: String,
    pub max: String,
}

/// Extracts the averages of `kind`; entries missing either bound are dropped.
pub fn averages(
    feed_office: &str,
    report_index: usize,
    report: &Report,
    kind: AverageKind,
) -> Vec<AverageRow> {
    let block = match kind {
        AverageKind::Temperature => report.temp_average.as_ref(),
        AverageKind::Precipitation => report.precip_average.as_ref(),
    };

    let Some(block) = block else {
        return Vec::new();
    };

    block
        .areas
        .iter()
        .filter_map(|average| {
            let (Some(min), Some(max)) = (&average.min, &average.max) else {
                return None;
            };

            Some(AverageRow {
                feed_office: feed_office.to_string(),
                report_index,
                kind,
                publishing_office: report.publishing_office.clone(),
                report_datetime: report.report_datetime.clone(),
                area_name: average.area.name.clone(),
                area_code: average.area.code.clone(),
                min: min.clone(),
                max: max.clone(),
            })
        })
        .collect()
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::forecast::{tests::forecast_fixture, WEEKLY_REPORT};

    #[test]
    fn should_pad_short_arrays() {
        let values = vec![Some("a".to_string())];
        let padded = pad(&values, 3);

        assert_eq!(padded, vec![Some("a".to_string()), None, None]);
    }

    #[test]
    fn should_truncate_long_arrays() {
        let values = vec![Some(1), Some(2), Some(3)];
        assert_eq!(pad(&values, 2), vec![Some(1), Some(2)]);
        assert!(pad(&values, 0).is_empty());
    }

    #[test]
    fn should_emit_one_row_per_time_define() {
        let forecast = forecast_fixture();
        let rows = flatten_report("016000", 0, &forecast[0]);

        // 3 + 2 + 2 time defines across the three series
        assert_eq!(rows.len(), 7);
        assert!(rows.iter().all(|r| r.feed_office == "016000" && r.report_index == 0));
    }

    #[test]
    fn should_leave_short_array_positions_empty() {
        let forecast = forecast_fixture();
        let rows = flatten_report("016000", 0, &forecast[0]);
        let ishikari: Vec<_> = rows.iter().filter(|r| r.area_code == "016010").take(3).collect();

        assert_eq!(ishikari[0].value(Element::Wave), Some("３メートル"));
        assert_eq!(ishikari[1].value(Element::Wave), None);
        assert_eq!(ishikari[1].value(Element::Wind), Some("北西の風　やや強く"));
        assert_eq!(ishikari[2].value(Element::Wind), None);
        assert_eq!(ishikari[2].value(Element::Weather), Some("くもり　時々　晴れ"));
        assert_eq!(ishikari[2].time_define, "2024-12-12T00:00:00+09:00");
    }

    #[test]
    fn should_keep_empty_strings_as_values() {
        let forecast = forecast_fixture();
        let rows = flatten_report("016000", WEEKLY_REPORT, &forecast[WEEKLY_REPORT]);

        assert_eq!(rows[0].value(Element::Pop), Some(""));
        assert_eq!(rows[2].value(Element::Reliability), Some("A"));
    }

    #[test]
    fn should_ignore_values_beyond_time_defines() {
        let report: Report = serde_json::from_value(serde_json::json!({
            "timeSeries": [{
                "timeDefines": ["2024-12-11T00:00:00+09:00"],
                "areas": [{"area": {"name": "札幌", "code": "14163"}, "temps": ["-4", "-1", "3"]}]
            }]
        }))
        .unwrap();

        let rows = flatten_report("016000", 0, &report);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value(Element::Temp), Some("-4"));
    }

    #[test]
    fn should_return_nothing_without_time_series() {
        let report: Report = serde_json::from_str(r#"{"publishingOffice": "気象庁"}"#).unwrap();
        assert!(flatten_report("130000", 0, &report).is_empty());
    }

    #[test]
    fn should_tag_rows_with_report_index() {
        let forecast = forecast_fixture();
        let rows = flatten_forecast("016000", &forecast);

        assert_eq!(rows.len(), 7 + 6);
        assert_eq!(rows.iter().filter(|r| r.report_index == WEEKLY_REPORT).count(), 6);
    }

    #[test]
    fn should_keep_only_complete_averages() {
        let forecast = forecast_fixture();
        let weekly = &forecast[WEEKLY_REPORT];

        let temps = averages("016000", WEEKLY_REPORT, weekly, AverageKind::Temperature);
        assert_eq!(temps.len(), 1);
        assert_eq!(temps[0].area_name, "札幌");
        assert_eq!(temps[0].min, "-4.1");
        assert_eq!(temps[0].max, "1.9");

        let precip = averages("016000", WEEKLY_REPORT, weekly, AverageKind::Precipitation);
        assert_eq!(precip.len(), 1);
        assert_eq!(precip[0].kind, AverageKind::Precipitation);

        assert!(averages("016000", 0, &forecast[0], AverageKind::Temperature).is_empty());
    }
}
