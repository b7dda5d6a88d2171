//! The parallel value arrays an area carries inside a time series.

use super::AreaSeries;

/// One per-area array that is aligned against `timeDefines`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    WeatherCode = 0,
    Weather,
    Wind,
    Wave,
    Pop,
    Temp,
    Reliability,
    TempsMin,
    TempsMinUpper,
    TempsMinLower,
    TempsMax,
    TempsMaxUpper,
    TempsMaxLower,
}

impl Element {
    pub const COUNT: usize = 13;

    pub const ALL: [Element; Element::COUNT] = [
        Element::WeatherCode,
        Element::Weather,
        Element::Wind,
        Element::Wave,
        Element::Pop,
        Element::Temp,
        Element::Reliability,
        Element::TempsMin,
        Element::TempsMinUpper,
        Element::TempsMinLower,
        Element::TempsMax,
        Element::TempsMaxUpper,
        Element::TempsMaxLower,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Key of the array in the forecast JSON.
    pub fn key(self) -> &'static str {
        match self {
            Element::WeatherCode => "weatherCodes",
            Element::Weather => "weathers",
            Element::Wind => "winds",
            Element::Wave => "waves",
            Element::Pop => "pops",
            Element::Temp => "temps",
            Element::Reliability => "reliabilities",
            Element::TempsMin => "tempsMin",
            Element::TempsMinUpper => "tempsMinUpper",
            Element::TempsMinLower => "tempsMinLower",
            Element::TempsMax => "tempsMax",
            Element::TempsMaxUpper => "tempsMaxUpper",
            Element::TempsMaxLower => "tempsMaxLower",
        }
    }

    /// Column name used by the store.
    pub fn column_name(self) -> &'static str {
        match self {
            Element::WeatherCode => "weather_code",
            Element::Weather => "weather",
            Element::Wind => "wind",
            Element::Wave => "wave",
            Element::Pop => "pop",
            Element::Temp => "temp",
            Element::Reliability => "reliabilities",
            Element::TempsMin => "temps_min",
            Element::TempsMinUpper => "temps_min_upper",
            Element::TempsMinLower => "temps_min_lower",
            Element::TempsMax => "temps_max",
            Element::TempsMaxUpper => "temps_max_upper",
            Element::TempsMaxLower => "temps_max_lower",
        }
    }

    /// Label shown next to the value in the detailed listing.
    pub fn label(self) -> &'static str {
        match self {
            Element::WeatherCode => "天気コード",
            Element::Weather => "天気",
            Element::Wind => "風",
            Element::Wave => "波",
            Element::Pop => "降水確率",
            Element::Temp => "温度",
            Element::Reliability => "信頼度",
            Element::TempsMin => "最低気温",
            Element::TempsMinUpper => "最低気温上限",
            Element::TempsMinLower => "最低気温下限",
            Element::TempsMax => "最高気温",
            Element::TempsMaxUpper => "最高気温上限",
            Element::TempsMaxLower => "最高気温下限",
        }
    }

    pub fn values(self, area: &AreaSeries) -> &[Option<String>] {
        match self {
            Element::WeatherCode => &area.weather_codes,
            Element::Weather => &area.weathers,
            Element::Wind => &area.winds,
            Element::Wave => &area.waves,
            Element::Pop => &area.pops,
            Element::Temp => &area.temps,
            Element::Reliability => &area.reliabilities,
            Element::TempsMin => &area.temps_min,
            Element::TempsMinUpper => &area.temps_min_upper,
            Element::TempsMinLower => &area.temps_min_lower,
            Element::TempsMax => &area.temps_max,
            Element::TempsMaxUpper => &area.temps_max_upper,
            Element::TempsMaxLower => &area.temps_max_lower,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_index_in_declaration_order() {
        for (position, element) in Element::ALL.iter().enumerate() {
            assert_eq!(element.index(), position);
        }
    }

    #[test]
    fn should_read_array_by_key() {
        let area: AreaSeries = serde_json::from_value(serde_json::json!({
            "area": {"name": "札幌", "code": "14163"},
            "tempsMaxUpper": ["", "3", "4"]
        }))
        .unwrap();

        assert_eq!(Element::TempsMaxUpper.key(), "tempsMaxUpper");
        assert_eq!(Element::TempsMaxUpper.values(&area).len(), 3);
        assert!(Element::TempsMin.values(&area).is_empty());
    }
}
