use std::collections::HashMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::error::DataError;

// ---------------------------------------------------------------------------
// DayKey – the join key shared by every chart
// ---------------------------------------------------------------------------

/// Stable integer key for one calendar day (days since 0001-01-01).
///
/// Derived once from the parsed date, so two charts built from the same
/// dataset always agree on which points describe the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(i32);

impl DayKey {
    pub fn from_date(date: NaiveDate) -> Self {
        DayKey(date.num_days_from_ce())
    }

    /// Day number, used by time scales.
    pub fn days(self) -> i32 {
        self.0
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match NaiveDate::from_num_days_from_ce_opt(self.0) {
            Some(date) => write!(f, "{date}"),
            None => write!(f, "day#{}", self.0),
        }
    }
}

// ---------------------------------------------------------------------------
// Field – numeric columns with an explicit accessor
// ---------------------------------------------------------------------------

/// The numeric columns of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Precipitation,
    Dewpoint,
    Pressure,
    Visibility,
    WindSpeedAvg,
    WindSpeedMax,
    TempMax,
    TempMin,
    TempDiff,
}

impl Field {
    /// Column name as it appears in the source CSV (and on axis titles).
    pub fn label(self) -> &'static str {
        match self {
            Field::Precipitation => "Precip",
            Field::Dewpoint => "Dewpoint",
            Field::Pressure => "Pressure",
            Field::Visibility => "Visibility",
            Field::WindSpeedAvg => "Windspeed",
            Field::WindSpeedMax => "MaxSpeed",
            Field::TempMax => "TempMax",
            Field::TempMin => "TempMin",
            Field::TempDiff => "TempDiff",
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one day of observations
// ---------------------------------------------------------------------------

/// One calendar day of weather observations.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub date: NaiveDate,
    pub precipitation: f64,
    pub dewpoint: f64,
    pub pressure: f64,
    pub visibility: f64,
    pub wind_speed_avg: f64,
    pub wind_speed_max: f64,
    pub temp_max: f64,
    pub temp_min: f64,
}

impl Record {
    /// A record with every measurement zeroed.
    pub fn new(date: NaiveDate) -> Self {
        Record {
            date,
            precipitation: 0.0,
            dewpoint: 0.0,
            pressure: 0.0,
            visibility: 0.0,
            wind_speed_avg: 0.0,
            wind_speed_max: 0.0,
            temp_max: 0.0,
            temp_min: 0.0,
        }
    }

    pub fn key(&self) -> DayKey {
        DayKey::from_date(self.date)
    }

    pub fn temp_diff(&self) -> f64 {
        self.temp_max - self.temp_min
    }

    /// Midpoint of the daily temperature range.
    pub fn mean_temp(&self) -> f64 {
        (self.temp_max + self.temp_min) / 2.0
    }

    pub fn value(&self, field: Field) -> f64 {
        match field {
            Field::Precipitation => self.precipitation,
            Field::Dewpoint => self.dewpoint,
            Field::Pressure => self.pressure,
            Field::Visibility => self.visibility,
            Field::WindSpeedAvg => self.wind_speed_avg,
            Field::WindSpeedMax => self.wind_speed_max,
            Field::TempMax => self.temp_max,
            Field::TempMin => self.temp_min,
            Field::TempDiff => self.temp_diff(),
        }
    }
}

// ---------------------------------------------------------------------------
// DataSet – the complete loaded table
// ---------------------------------------------------------------------------

/// All records, sorted by date, with a day-key index.
#[derive(Debug, Clone)]
pub struct DataSet {
    records: Vec<Record>,
    index: HashMap<DayKey, usize>,
}

impl DataSet {
    /// Sort by date and build the key index. Duplicate days are rejected.
    pub fn from_records(mut records: Vec<Record>) -> Result<Self, DataError> {
        if records.is_empty() {
            return Err(DataError::EmptyDataset);
        }
        records.sort_by_key(|r| r.date);

        let mut index = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if index.insert(record.key(), i).is_some() {
                return Err(DataError::DuplicateDate { date: record.date });
            }
        }

        Ok(DataSet { records, index })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up the record for a day.
    pub fn get(&self, key: DayKey) -> Option<&Record> {
        self.index.get(&key).map(|&i| &self.records[i])
    }

    /// `[min, max]` of a field over all records.
    pub fn extent(&self, field: Field) -> Option<(f64, f64)> {
        crate::scale::extent(self.records.iter().map(|r| r.value(field)))
    }

    /// First and last day.
    pub fn date_extent(&self) -> Option<(DayKey, DayKey)> {
        let first = self.records.first()?;
        let last = self.records.last()?;
        Some((first.key(), last.key()))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("fixture date")
    }

    pub fn record(s: &str) -> Record {
        Record::new(day(s))
    }

    /// Record with the fields the scatterplot and line graph read.
    pub fn weather(s: &str, pressure: f64, dewpoint: f64, t_max: f64, t_min: f64) -> Record {
        Record {
            pressure,
            dewpoint,
            visibility: dewpoint / 10.0,
            temp_max: t_max,
            temp_min: t_min,
            precipitation: (t_max - t_min) / 10.0,
            ..record(s)
        }
    }

    pub fn dataset(records: Vec<Record>) -> DataSet {
        DataSet::from_records(records).expect("fixture dataset")
    }

    /// Five days spread over pressure/dewpoint space.
    pub fn five_days() -> DataSet {
        dataset(vec![
            weather("2021-03-01", 29.8, 30.0, 55.0, 40.0),
            weather("2021-03-02", 30.0, 35.0, 60.0, 42.0),
            weather("2021-03-03", 30.1, 45.0, 65.0, 50.0),
            weather("2021-03-04", 30.3, 50.0, 70.0, 52.0),
            weather("2021-03-05", 30.5, 60.0, 75.0, 61.0),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn from_records_sorts_and_indexes() {
        let ds = dataset(vec![record("2022-01-03"), record("2022-01-01"), record("2022-01-02")]);
        let dates: Vec<_> = ds.records().iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![day("2022-01-01"), day("2022-01-02"), day("2022-01-03")]);

        let key = DayKey::from_date(day("2022-01-02"));
        assert_eq!(ds.get(key).map(|r| r.date), Some(day("2022-01-02")));
        assert!(ds.get(DayKey::from_date(day("2023-01-01"))).is_none());
    }

    #[test]
    fn duplicate_dates_are_rejected() {
        let err = DataSet::from_records(vec![record("2022-01-01"), record("2022-01-01")]).unwrap_err();
        assert!(matches!(err, DataError::DuplicateDate { .. }));
    }

    #[test]
    fn empty_dataset_is_rejected() {
        assert!(matches!(
            DataSet::from_records(Vec::new()),
            Err(DataError::EmptyDataset)
        ));
    }

    #[test]
    fn derived_fields() {
        let r = Record {
            temp_max: 71.0,
            temp_min: 50.0,
            ..record("2020-06-01")
        };
        assert_eq!(r.temp_diff(), 21.0);
        assert_eq!(r.value(Field::TempDiff), 21.0);
        assert_eq!(r.mean_temp(), 60.5);
    }

    #[test]
    fn extent_over_field() {
        let ds = five_days();
        assert_eq!(ds.extent(Field::Dewpoint), Some((30.0, 60.0)));
        assert_eq!(ds.extent(Field::Pressure), Some((29.8, 30.5)));
        let (first, last) = ds.date_extent().unwrap();
        assert_eq!(last.days() - first.days(), 4);
    }

    #[test]
    fn day_key_displays_as_iso_date() {
        assert_eq!(DayKey::from_date(day("2020-02-29")).to_string(), "2020-02-29");
    }
}
