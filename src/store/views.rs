//! Presentation queries behind the viewer and the CLI listings.

use rusqlite::params_from_iter;

use super::Store;
use crate::{
    error::Result,
    flatten::Missing,
    tables::{
        Column, TableSpec, WEATHER_INFO, WEATHER_POPS, WEATHER_POP_AVE, WEATHER_RELIABILITIES,
        WEATHER_TEMPS, WEATHER_TEMP_AVE, WEATHER_TT,
    },
};

/// One stored table as offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Weather,
    Precipitation,
    Temperature,
    Reliability,
    WeeklyTemperature,
    TemperatureAverage,
    PrecipitationAverage,
}

impl View {
    pub const ALL: [View; 7] = [
        View::Weather,
        View::Precipitation,
        View::Temperature,
        View::Reliability,
        View::WeeklyTemperature,
        View::TemperatureAverage,
        View::PrecipitationAverage,
    ];

    pub fn spec(self) -> &'static TableSpec {
        match self {
            View::Weather => &WEATHER_INFO,
            View::Precipitation => &WEATHER_POPS,
            View::Temperature => &WEATHER_TEMPS,
            View::Reliability => &WEATHER_RELIABILITIES,
            View::WeeklyTemperature => &WEATHER_TT,
            View::TemperatureAverage => &WEATHER_TEMP_AVE,
            View::PrecipitationAverage => &WEATHER_POP_AVE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            View::Weather => "天気",
            View::Precipitation => "降水確率",
            View::Temperature => "気温",
            View::Reliability => "信頼度",
            View::WeeklyTemperature => "週間気温",
            View::TemperatureAverage => "平年気温",
            View::PrecipitationAverage => "平年降水量",
        }
    }

    /// Averages carry no `time_define`, so they cannot be filtered by date.
    pub fn has_time(self) -> bool {
        self.spec().columns.contains(&Column::TimeDefine)
    }

    fn columns(self) -> impl Iterator<Item = Column> {
        self.spec()
            .columns
            .iter()
            .copied()
            .filter(|column| *column != Column::FeedOffice)
    }
}

/// Which rows of a view to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Everything fetched from one office's feed.
    Office(String),
    /// Rows whose area code is this class10 sub-area.
    SubArea(String),
}

impl Scope {
    pub fn code(&self) -> &str {
        match self {
            Scope::Office(code) | Scope::SubArea(code) => code,
        }
    }

    fn from_clause(&self, table: &str) -> String {
        match self {
            Scope::Office(_) => format!("FROM {} t WHERE t.feed_office = ?1", table),
            Scope::SubArea(_) => format!(
                "FROM {} t JOIN (SELECT DISTINCT class10s_id FROM areas) a \
                 ON a.class10s_id = t.offices_code WHERE a.class10s_id = ?1",
                table
            ),
        }
    }
}

fn header(column: Column) -> &'static str {
    match column {
        Column::OfficesCode => "地域コード",
        Column::PublishingOffice => "発表局",
        Column::ReportDatetime => "発表日時",
        Column::AreaName => "エリア",
        Column::TimeDefine => "日時",
        Column::Element(element) => element.label(),
        Column::TempAverageMin => "平年最低気温",
        Column::TempAverageMax => "平年最高気温",
        Column::PrecipAverageMin => "平年降水量下限",
        Column::PrecipAverageMax => "平年降水量上限",
        Column::FeedOffice => "取得元",
    }
}

/// Display-ready rows: missing values already replaced by the sentinel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewTable {
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl ViewTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Store {
    /// Distinct `YYYY-MM-DD` dates present in a view for the scope.
    pub fn time_defines(&self, view: View, scope: &Scope) -> Result<Vec<String>> {
        if !view.has_time() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT DISTINCT substr(t.time_define, 1, 10) AS day {} ORDER BY day",
            scope.from_clause(view.spec().name)
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let days = stmt
            .query_map([scope.code()], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(days)
    }

    /// Rows of a view for the scope, optionally limited to one date.
    pub fn view_rows(&self, view: View, scope: &Scope, date: Option<&str>) -> Result<ViewTable> {
        let columns: Vec<Column> = view.columns().collect();
        let select: Vec<String> = columns.iter().map(|c| format!("t.{}", c.name())).collect();

        let mut sql = format!(
            "SELECT {} {}",
            select.join(", "),
            scope.from_clause(view.spec().name)
        );
        let mut params = vec![scope.code().to_string()];

        if let Some(date) = date.filter(|_| view.has_time()) {
            sql.push_str(" AND t.time_define LIKE ?2 || '%'");
            params.push(date.to_string());
        }
        sql.push_str(" ORDER BY t.id");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                (0..columns.len())
                    .map(|idx| -> rusqlite::Result<String> {
                        let value = row.get::<_, Option<String>>(idx)?;
                        Ok(Missing::Sentinel.fill(value.as_deref()).unwrap_or_default())
                    })
                    .collect::<rusqlite::Result<Vec<String>>>()
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(ViewTable {
            columns: columns.into_iter().map(header).collect(),
            rows,
        })
    }
}
