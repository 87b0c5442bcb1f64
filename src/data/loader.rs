use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

use super::model::{DataSet, Record};
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the daily weather table from a CSV file.
///
/// Expected header (extra columns are ignored):
/// `Date,Precip,Dewpoint,Pressure,Visibility,Windspeed,MaxSpeed,TempMax,TempMin`
pub fn load_file(path: &Path) -> Result<DataSet, DataError> {
    let file = File::open(path).map_err(csv::Error::from)?;
    load_reader(file)
}

/// Same as [`load_file`] for any reader.
pub fn load_reader<R: Read>(input: R) -> Result<DataSet, DataError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);
    read_rows(reader)
}

// ---------------------------------------------------------------------------
// Row decoding
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Precip")]
    precip: f64,
    #[serde(rename = "Dewpoint")]
    dewpoint: f64,
    #[serde(rename = "Pressure")]
    pressure: f64,
    #[serde(rename = "Visibility")]
    visibility: f64,
    #[serde(rename = "Windspeed")]
    windspeed: f64,
    #[serde(rename = "MaxSpeed")]
    max_speed: f64,
    #[serde(rename = "TempMax")]
    temp_max: f64,
    #[serde(rename = "TempMin")]
    temp_min: f64,
}

fn read_rows<R: Read>(mut reader: csv::Reader<R>) -> Result<DataSet, DataError> {
    let mut records = Vec::new();

    for (row_no, result) in reader.deserialize::<RawRow>().enumerate() {
        let raw = result?;
        let date = parse_date(&raw.date).ok_or_else(|| DataError::InvalidDate {
            row: row_no + 1,
            value: raw.date.clone(),
        })?;

        records.push(Record {
            date,
            precipitation: raw.precip,
            dewpoint: raw.dewpoint,
            pressure: raw.pressure,
            visibility: raw.visibility,
            wind_speed_avg: raw.windspeed,
            wind_speed_max: raw.max_speed,
            temp_max: raw.temp_max,
            temp_min: raw.temp_min,
        });
    }

    let dataset = DataSet::from_records(records)?;
    if let Some((first, last)) = dataset.date_extent() {
        log::debug!("Parsed {} days from {first} to {last}", dataset.len());
    }
    Ok(dataset)
}

/// Parse a `Date` cell down to its calendar day.
///
/// Timestamps are truncated to the date so every chart joins on the same
/// day key regardless of the time component.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];
    const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

    let s = s.trim();
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::model::{DayKey, Field};

    const HEADER: &str = "Date,Precip,Dewpoint,Pressure,Visibility,Windspeed,MaxSpeed,TempMax,TempMin";

    fn csv_text(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn parses_rows_in_date_order() {
        let text = csv_text(&[
            "2020-01-02,0.5,40.1,30.02,9.5,6.1,14.0,58,41",
            "2020-01-01,0.0,35.0,30.10,10,4.2,11.0,52,33",
        ]);
        let ds = load_reader(text.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        let first = &ds.records()[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(first.temp_max, 52.0);
        assert_eq!(first.value(Field::TempDiff), 19.0);
        assert_eq!(ds.records()[1].wind_speed_max, 14.0);
    }

    #[test]
    fn extra_columns_and_whitespace_are_tolerated() {
        let text = "Station, Date ,Precip,Dewpoint,Pressure,Visibility,Windspeed,MaxSpeed,TempMax,TempMin\n\
                    ATL, 2021-07-04 ,1.25,68,29.9,7,5,12,91,72\n";
        let ds = load_reader(text.as_bytes()).unwrap();
        assert_eq!(ds.records()[0].precipitation, 1.25);
    }

    #[test]
    fn timestamps_truncate_to_the_same_day_key() {
        let a = parse_date("2022-03-05").unwrap();
        let b = parse_date("2022-03-05T23:59:59").unwrap();
        let c = parse_date("2022-03-05T00:00:00.000Z").unwrap();
        let d = parse_date("03/05/2022").unwrap();
        assert_eq!(DayKey::from_date(a), DayKey::from_date(b));
        assert_eq!(DayKey::from_date(a), DayKey::from_date(c));
        assert_eq!(a, d);
        assert!(parse_date("not a date").is_none());
    }

    #[test]
    fn bad_date_reports_row() {
        let text = csv_text(&["2020-01-01,0,1,2,3,4,5,6,7", "soon,0,1,2,3,4,5,6,7"]);
        match load_reader(text.as_bytes()) {
            Err(DataError::InvalidDate { row, value }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "soon");
            }
            other => panic!("expected InvalidDate, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_cell_is_a_csv_error() {
        let text = csv_text(&["2020-01-01,lots,1,2,3,4,5,6,7"]);
        assert!(matches!(load_reader(text.as_bytes()), Err(DataError::Csv(_))));
    }

    #[test]
    fn header_only_is_empty() {
        assert!(matches!(
            load_reader(HEADER.as_bytes()),
            Err(DataError::EmptyDataset)
        ));
    }

    #[test]
    fn load_file_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", csv_text(&["2022-12-31,0.1,30,30.2,10,3,9,45,28"])).unwrap();
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, DataError::Csv(_)));
    }
}
