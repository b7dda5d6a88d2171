//! Target tables: which columns each one keeps and which rows it accepts.

use crate::{
    feed::{forecast::WEEKLY_REPORT, Element, Report},
    flatten::{averages, flatten_forecast, AverageKind, AverageRow, ForecastRow, Missing},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// Holds the area code of the row, not an office code.
    OfficesCode,
    PublishingOffice,
    ReportDatetime,
    AreaName,
    TimeDefine,
    Element(Element),
    TempAverageMin,
    TempAverageMax,
    PrecipAverageMin,
    PrecipAverageMax,
    FeedOffice,
}

impl Column {
    pub fn name(self) -> &'static str {
        match self {
            Column::OfficesCode => "offices_code",
            Column::PublishingOffice => "publishing_office",
            Column::ReportDatetime => "report_datetime",
            Column::AreaName => "area_name",
            Column::TimeDefine => "time_define",
            Column::Element(element) => element.column_name(),
            Column::TempAverageMin => "temps_ave_min",
            Column::TempAverageMax => "temps_ave_max",
            Column::PrecipAverageMin => "temps_pop_min",
            Column::PrecipAverageMax => "temps_pop_max",
            Column::FeedOffice => "feed_office",
        }
    }
}

/// Something that can be projected onto table columns.
pub trait Row {
    /// Whether this kind of row has the column at all.
    fn carries(&self, column: Column) -> bool;
    fn value(&self, column: Column) -> Option<&str>;
    fn report_index(&self) -> usize;
}

impl Row for ForecastRow {
    fn carries(&self, column: Column) -> bool {
        !matches!(
            column,
            Column::TempAverageMin
                | Column::TempAverageMax
                | Column::PrecipAverageMin
                | Column::PrecipAverageMax
        )
    }

    fn value(&self, column: Column) -> Option<&str> {
        match column {
            Column::OfficesCode => Some(&self.area_code),
            Column::PublishingOffice => Some(&self.publishing_office),
            Column::ReportDatetime => Some(&self.report_datetime),
            Column::AreaName => Some(&self.area_name),
            Column::TimeDefine => Some(&self.time_define),
            Column::Element(element) => ForecastRow::value(self, element),
            Column::FeedOffice => Some(&self.feed_office),
            _ => None,
        }
    }

    fn report_index(&self) -> usize {
        self.report_index
    }
}

impl Row for AverageRow {
    fn carries(&self, column: Column) -> bool {
        match column {
            Column::OfficesCode
            | Column::PublishingOffice
            | Column::ReportDatetime
            | Column::AreaName
            | Column::FeedOffice => true,
            Column::TempAverageMin | Column::TempAverageMax => {
                self.kind == AverageKind::Temperature
            }
            Column::PrecipAverageMin | Column::PrecipAverageMax => {
                self.kind == AverageKind::Precipitation
            }
            Column::TimeDefine | Column::Element(_) => false,
        }
    }

    fn value(&self, column: Column) -> Option<&str> {
        if !self.carries(column) {
            return None;
        }

        match column {
            Column::OfficesCode => Some(&self.area_code),
            Column::PublishingOffice => Some(&self.publishing_office),
            Column::ReportDatetime => Some(&self.report_datetime),
            Column::AreaName => Some(&self.area_name),
            Column::FeedOffice => Some(&self.feed_office),
            Column::TempAverageMin | Column::PrecipAverageMin => Some(&self.min),
            Column::TempAverageMax | Column::PrecipAverageMax => Some(&self.max),
            Column::TimeDefine | Column::Element(_) => None,
        }
    }

    fn report_index(&self) -> usize {
        self.report_index
    }
}

/// A target table: its allow-list of columns and the rows it accepts.
#[derive(Debug)]
pub struct TableSpec {
    pub name: &'static str,
    pub columns: &'static [Column],
    /// A row is kept only when every one of these has a value.
    pub required: &'static [Column],
    /// Restricts the source to one report of the feed.
    pub report: Option<usize>,
}

const COMMON: [Column; 5] = [
    Column::OfficesCode,
    Column::PublishingOffice,
    Column::ReportDatetime,
    Column::AreaName,
    Column::TimeDefine,
];

macro_rules! columns {
    ($($column:expr),* $(,)?) => {
        &[
            COMMON[0], COMMON[1], COMMON[2], COMMON[3], COMMON[4],
            $($column,)*
            Column::FeedOffice,
        ]
    };
}

const WEEKLY_TEMPS: [Column; 6] = [
    Column::Element(Element::TempsMin),
    Column::Element(Element::TempsMinUpper),
    Column::Element(Element::TempsMinLower),
    Column::Element(Element::TempsMax),
    Column::Element(Element::TempsMaxUpper),
    Column::Element(Element::TempsMaxLower),
];

pub const WEATHER_INFO: TableSpec = TableSpec {
    name: "weather_info",
    columns: columns![
        Column::Element(Element::WeatherCode),
        Column::Element(Element::Weather),
        Column::Element(Element::Wind),
        Column::Element(Element::Wave),
    ],
    required: &[Column::Element(Element::Weather)],
    report: None,
};

pub const WEATHER_POPS: TableSpec = TableSpec {
    name: "weather_pops",
    columns: columns![Column::Element(Element::Pop)],
    required: &[Column::Element(Element::Pop)],
    report: None,
};

pub const WEATHER_TEMPS: TableSpec = TableSpec {
    name: "weather_temps",
    columns: columns![Column::Element(Element::Temp)],
    required: &[Column::Element(Element::Temp)],
    report: None,
};

pub const WEATHER_RELIABILITIES: TableSpec = TableSpec {
    name: "weather_reliabilities",
    columns: columns![
        Column::Element(Element::WeatherCode),
        Column::Element(Element::Pop),
        Column::Element(Element::Reliability),
    ],
    required: &[Column::Element(Element::Reliability)],
    report: None,
};

pub const WEATHER_TT: TableSpec = TableSpec {
    name: "weather_tt",
    columns: columns![
        WEEKLY_TEMPS[0],
        WEEKLY_TEMPS[1],
        WEEKLY_TEMPS[2],
        WEEKLY_TEMPS[3],
        WEEKLY_TEMPS[4],
        WEEKLY_TEMPS[5],
    ],
    required: &WEEKLY_TEMPS,
    report: Some(WEEKLY_REPORT),
};

pub const WEATHER_TEMP_AVE: TableSpec = TableSpec {
    name: "weather_temp_ave",
    columns: &[
        Column::OfficesCode,
        Column::PublishingOffice,
        Column::ReportDatetime,
        Column::AreaName,
        Column::TempAverageMin,
        Column::TempAverageMax,
        Column::FeedOffice,
    ],
    required: &[Column::TempAverageMin, Column::TempAverageMax],
    report: Some(WEEKLY_REPORT),
};

pub const WEATHER_POP_AVE: TableSpec = TableSpec {
    name: "weather_pop_ave",
    columns: &[
        Column::OfficesCode,
        Column::PublishingOffice,
        Column::ReportDatetime,
        Column::AreaName,
        Column::PrecipAverageMin,
        Column::PrecipAverageMax,
        Column::FeedOffice,
    ],
    required: &[Column::PrecipAverageMin, Column::PrecipAverageMax],
    report: Some(WEEKLY_REPORT),
};

/// Tables fed from flattened time series.
pub const SERIES_TABLES: [&TableSpec; 5] = [
    &WEATHER_INFO,
    &WEATHER_POPS,
    &WEATHER_TEMPS,
    &WEATHER_RELIABILITIES,
    &WEATHER_TT,
];

pub const ALL_TABLES: [&TableSpec; 7] = [
    &WEATHER_INFO,
    &WEATHER_POPS,
    &WEATHER_TEMPS,
    &WEATHER_RELIABILITIES,
    &WEATHER_TT,
    &WEATHER_TEMP_AVE,
    &WEATHER_POP_AVE,
];

/// Rows projected onto the columns a table will receive.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: &'static str,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Selects the rows `spec` accepts and projects them onto its observed columns.
///
/// The allow-list is narrowed to the columns the kept rows actually carry,
/// in allow-list order; with no kept rows there are no columns either.
/// Absent values are filled according to `missing`.
pub fn materialize<R: Row>(spec: &TableSpec, rows: &[R], missing: Missing) -> Table {
    let kept: Vec<&R> = rows
        .iter()
        .filter(|row| spec.report.map_or(true, |index| row.report_index() == index))
        .filter(|row| spec.required.iter().all(|column| row.value(*column).is_some()))
        .collect();

    let columns: Vec<Column> = spec
        .columns
        .iter()
        .copied()
        .filter(|column| kept.iter().any(|row| row.carries(*column)))
        .collect();

    let rows = kept
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| missing.fill(row.value(*column)))
                .collect()
        })
        .collect();

    Table {
        name: spec.name,
        columns,
        rows,
    }
}

/// Materializes every target table from one office's forecast, absent values as `NULL`.
pub fn materialize_forecast(feed_office: &str, reports: &[Report]) -> Vec<Table> {
    let rows = flatten_forecast(feed_office, reports);
    let mut tables: Vec<Table> = SERIES_TABLES
        .iter()
        .map(|spec| materialize(spec, &rows, Missing::Null))
        .collect();

    let (temp_averages, precip_averages) = match reports.get(WEEKLY_REPORT) {
        Some(weekly) => (
            averages(feed_office, WEEKLY_REPORT, weekly, AverageKind::Temperature),
            averages(feed_office, WEEKLY_REPORT, weekly, AverageKind::Precipitation),
        ),
        None => (Vec::new(), Vec::new()),
    };
    tables.push(materialize(&WEATHER_TEMP_AVE, &temp_averages, Missing::Null));
    tables.push(materialize(&WEATHER_POP_AVE, &precip_averages, Missing::Null));

    tables
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::forecast::tests::forecast_fixture;

    fn table<'a>(tables: &'a [Table], name: &str) -> &'a Table {
        tables.iter().find(|t| t.name == name).unwrap()
    }

    fn column_names(table: &Table) -> Vec<&'static str> {
        table.columns.iter().map(|c| c.name()).collect()
    }

    #[test]
    fn should_end_every_table_with_feed_office() {
        for spec in ALL_TABLES {
            assert_eq!(spec.columns.last(), Some(&Column::FeedOffice), "{}", spec.name);
        }
    }

    #[test]
    fn should_keep_rows_with_weather_only() {
        let tables = materialize_forecast("016000", &forecast_fixture());
        let info = table(&tables, "weather_info");

        assert_eq!(info.rows.len(), 3);
        assert_eq!(
            column_names(info),
            vec![
                "offices_code",
                "publishing_office",
                "report_datetime",
                "area_name",
                "time_define",
                "weather_code",
                "weather",
                "wind",
                "wave",
                "feed_office"
            ]
        );
        assert_eq!(info.rows[2][7], None);
        assert_eq!(info.rows[0][9], Some("016000".to_string()));
    }

    #[test]
    fn should_take_pops_from_both_reports() {
        let tables = materialize_forecast("016000", &forecast_fixture());
        let pops = table(&tables, "weather_pops");

        // 2 short-term + 3 weekly (empty strings still count as present)
        assert_eq!(pops.rows.len(), 5);
        assert_eq!(pops.rows[2][5], Some(String::new()));
    }

    #[test]
    fn should_keep_rows_with_temps_and_reliabilities() {
        let tables = materialize_forecast("016000", &forecast_fixture());

        assert_eq!(table(&tables, "weather_temps").rows.len(), 2);

        let reliabilities = table(&tables, "weather_reliabilities");
        assert_eq!(reliabilities.rows.len(), 3);
        assert_eq!(reliabilities.rows[2][7], Some("A".to_string()));
    }

    #[test]
    fn should_require_all_six_weekly_temperatures() {
        let tables = materialize_forecast("016000", &forecast_fixture());
        let tt = table(&tables, "weather_tt");

        // the third day lacks tempsMaxLower
        assert_eq!(tt.rows.len(), 2);
        assert_eq!(tt.rows[1][5], Some("-5".to_string()));
        assert_eq!(tt.columns.len(), 12);
    }

    #[test]
    fn should_materialize_averages() {
        let tables = materialize_forecast("016000", &forecast_fixture());

        let temp_ave = table(&tables, "weather_temp_ave");
        assert_eq!(temp_ave.rows.len(), 1);
        assert_eq!(
            column_names(temp_ave),
            vec![
                "offices_code",
                "publishing_office",
                "report_datetime",
                "area_name",
                "temps_ave_min",
                "temps_ave_max",
                "feed_office"
            ]
        );

        let pop_ave = table(&tables, "weather_pop_ave");
        assert_eq!(pop_ave.rows[0][4], Some("10.5".to_string()));
    }

    #[test]
    fn should_fill_absent_values_per_policy() {
        let rows = flatten_forecast("016000", &forecast_fixture());

        let stored = materialize(&WEATHER_INFO, &rows, Missing::Null);
        assert_eq!(stored.rows[1][8], None);

        let shown = materialize(&WEATHER_INFO, &rows, Missing::Sentinel);
        assert_eq!(shown.rows[0][8], Some("３メートル".to_string()));
        assert_eq!(shown.rows[1][8], Some("情報なし".to_string()));
        assert_eq!(shown.rows.len(), stored.rows.len());
    }

    #[test]
    fn should_produce_no_columns_without_rows() {
        let rows: Vec<ForecastRow> = Vec::new();
        let table = materialize(&WEATHER_INFO, &rows, Missing::Null);

        assert!(table.is_empty());
        assert!(table.columns.is_empty());
    }

    #[test]
    fn should_drop_columns_rows_do_not_carry() {
        let forecast = forecast_fixture();
        let rows = averages("016000", WEEKLY_REPORT, &forecast[WEEKLY_REPORT], AverageKind::Temperature);
        let table = materialize(&WEATHER_POP_AVE, &rows, Missing::Null);

        // temperature averages never satisfy the precipitation table
        assert!(table.is_empty());
    }

    #[test]
    fn should_skip_weekly_tables_without_weekly_report() {
        let forecast = forecast_fixture();
        let tables = materialize_forecast("016000", &forecast[..1]);

        assert_eq!(tables.len(), 7);
        assert!(table(&tables, "weather_tt").is_empty());
        assert!(table(&tables, "weather_temp_ave").is_empty());
        assert_eq!(table(&tables, "weather_info").rows.len(), 3);
    }
}
