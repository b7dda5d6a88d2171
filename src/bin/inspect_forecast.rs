//! Forecast Feed Investigation Utility
//!
//! Downloads one office's raw forecast JSON and prints its layout:
//! - Reports and their publishing metadata
//! - Length of each series' `timeDefines`
//! - Length of every per-area array, flagging ones that disagree with `timeDefines`

use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Parser;
use serde_json::Value;

#[derive(Parser)]
#[command(version, about = "Prints the structure of a JMA forecast feed")]
struct Args {
    /// Office code, e.g. 130000 for Tokyo
    #[arg(default_value = "130000")]
    office: String,

    #[arg(long, env = "JMA_BASE_URL", default_value = "https://www.jma.go.jp/bosai")]
    base_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let url = format!(
        "{}/forecast/data/forecast/{}.json",
        args.base_url.trim_end_matches('/'),
        args.office
    );

    println!("🔍 Forecast feed investigation\n");
    println!("📦 Downloading {}", url);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;
    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        return Err(anyhow!("Request failed with status {}", response.status()));
    }
    let feed: Value = response.json().await?;

    for line in describe(&feed) {
        println!("{}", line);
    }

    Ok(())
}

fn text<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("-")
}

/// One line per report, series and area array.
fn describe(feed: &Value) -> Vec<String> {
    let Some(reports) = feed.as_array() else {
        return vec!["⚠️ Feed is not an array of reports".to_string()];
    };

    let mut lines = vec![format!("📋 {} report(s)", reports.len())];

    for (index, report) in reports.iter().enumerate() {
        lines.push(format!(
            "\nReport {}: {} @ {}",
            index,
            text(report, "publishingOffice"),
            text(report, "reportDatetime")
        ));

        let series = report
            .get("timeSeries")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        for (series_index, series) in series.iter().enumerate() {
            let times = series
                .get("timeDefines")
                .and_then(Value::as_array)
                .map_or(0, Vec::len);
            lines.push(format!("  Series {}: {} timeDefines", series_index, times));

            let areas = series
                .get("areas")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();

            for area in &areas {
                let name = area.get("area").map_or("-", |a| text(a, "name"));
                let arrays: Vec<String> = area
                    .as_object()
                    .into_iter()
                    .flatten()
                    .filter_map(|(key, value)| value.as_array().map(|items| (key, items.len())))
                    .map(|(key, len)| {
                        let flag = if len == times { "" } else { " ⚠️" };
                        format!("{}={}{}", key, len, flag)
                    })
                    .collect();
                lines.push(format!("    {}: {}", name, arrays.join(", ")));
            }
        }

        for key in ["tempAverage", "precipAverage"] {
            if let Some(areas) = report.pointer(&format!("/{}/areas", key)).and_then(Value::as_array) {
                lines.push(format!("  {}: {} area(s)", key, areas.len()));
            }
        }
    }

    lines
}

// -- Tests -------------------------------------------------------------------
