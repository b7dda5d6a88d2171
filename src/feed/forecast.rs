//! The per-office forecast published at `forecast/data/forecast/{office}.json`.
//!
//! The document is an array of reports: the short-term forecast first and
//! the weekly forecast second.

use serde::Deserialize;

use super::{lenient_list, lenient_option, unknown};

pub type Forecast = Vec<Report>;

/// Index of the weekly report inside a forecast.
pub const WEEKLY_REPORT: usize = 1;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(default = "unknown")]
    pub publishing_office: String,
    #[serde(default = "unknown")]
    pub report_datetime: String,
    #[serde(default)]
    pub time_series: Vec<TimeSeries>,
    #[serde(default)]
    pub temp_average: Option<AverageBlock>,
    #[serde(default)]
    pub precip_average: Option<AverageBlock>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimeSeries {
    pub time_defines: Vec<String>,
    pub areas: Vec<AreaSeries>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AreaRef {
    #[serde(default = "unknown")]
    pub name: String,
    #[serde(default = "unknown")]
    pub code: String,
}

impl Default for AreaRef {
    fn default() -> Self {
        Self {
            name: unknown(),
            code: unknown(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaSeries {
    #[serde(default)]
    pub area: AreaRef,
    #[serde(default, deserialize_with = "lenient_list")]
    pub weather_codes: Vec<Option<String>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub weathers: Vec<Option<String>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub winds: Vec<Option<String>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub waves: Vec<Option<String>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub pops: Vec<Option<String>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub temps: Vec<Option<String>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub reliabilities: Vec<Option<String>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub temps_min: Vec<Option<String>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub temps_min_upper: Vec<Option<String>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub temps_min_lower: Vec<Option<String>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub temps_max: Vec<Option<String>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub temps_max_upper: Vec<Option<String>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub temps_max_lower: Vec<Option<String>>,
}

/// `tempAverage` / `precipAverage`: climatological normals per station.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AverageBlock {
    pub areas: Vec<Average>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Average {
    #[serde(default)]
    pub area: AreaRef,
    #[serde(default, deserialize_with = "lenient_option")]
    pub min: Option<String>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub max: Option<String>,
}

// -- Tests -------------------------------------------------------------------
