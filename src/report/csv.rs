use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use ::csv::Writer;
use anyhow::{Context as _, Result};
use chrono::NaiveDate;

use crate::tank::{TankReading, format_value};

const CSV_HEADER: [&str; 5] = [
    "TankCode",
    "WeightValue",
    "LevelValue",
    "TempValue",
    "CapDate",
];

pub fn csv_file_name(date: NaiveDate) -> String {
    format!("DailyReport_{}.csv", date.format("%Y-%m-%d"))
}

/// Writes every reading, grouped or not, and returns the number of data rows.
pub fn write_csv<W: Write>(writer: W, readings: &[TankReading]) -> Result<usize> {
    let mut writer = Writer::from_writer(writer);

    writer
        .write_record(CSV_HEADER)
        .context("failed to write CSV header")?;

    for reading in readings {
        writer
            .write_record([
                reading.tank_code.clone(),
                format_value(reading.weight),
                format_value(reading.level),
                format_value(reading.temperature),
                reading.formatted_captured_at(),
            ])
            .with_context(|| format!("failed to write CSV row for {}", reading.tank_code))?;
    }

    writer.flush().context("failed to flush CSV writer")?;

    Ok(readings.len())
}

pub fn write_csv_file(dir: &Path, date: NaiveDate, readings: &[TankReading]) -> Result<PathBuf> {
    let path = dir.join(csv_file_name(date));
    let file =
        File::create(&path).with_context(|| format!("failed to create file: {path:?}"))?;

    write_csv(file, readings).with_context(|| format!("failed to write report: {path:?}"))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use ::csv::Reader;

    use super::*;

    fn readings() -> Vec<TankReading> {
        let at = NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(9, 15, 0)
            .unwrap();

        vec![
            TankReading {
                tank_code: "ISO1".to_string(),
                weight: Some(1200.456),
                level: Some(80.0),
                temperature: Some(24.1),
                captured_at: at,
            },
            TankReading {
                tank_code: "Poly1".to_string(),
                weight: None,
                level: Some(12.5),
                temperature: None,
                captured_at: at,
            },
            TankReading {
                tank_code: "Water, 1".to_string(),
                weight: Some(3.0),
                level: None,
                temperature: Some(-2.25),
                captured_at: at,
            },
        ]
    }

    #[test]
    fn file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(csv_file_name(date), "DailyReport_2026-01-05.csv");
    }

    #[test]
    fn row_count_matches_readings() {
        let readings = readings();
        let mut buf = Vec::new();

        let written = write_csv(&mut buf, &readings).unwrap();

        let mut reader = Reader::from_reader(buf.as_slice());
        let headers = reader.headers().unwrap().clone();
        let rows: Vec<_> = reader.records().map(|r| r.unwrap()).collect();

        assert_eq!(written, readings.len());
        assert_eq!(rows.len(), readings.len());
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["TankCode", "WeightValue", "LevelValue", "TempValue", "CapDate"]
        );
        assert_eq!(
            rows[0].iter().collect::<Vec<_>>(),
            vec!["ISO1", "1200.46", "80.00", "24.10", "18-10-2026 09:15"]
        );
        assert_eq!(&rows[1][1], "");
        assert_eq!(&rows[2][0], "Water, 1");
        assert_eq!(&rows[2][3], "-2.25");
    }

    #[test]
    fn empty_result_writes_header_only() {
        let mut buf = Vec::new();

        assert_eq!(write_csv(&mut buf, &[]).unwrap(), 0);
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "TankCode,WeightValue,LevelValue,TempValue,CapDate\n"
        );
    }

    #[test]
    fn writes_report_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();

        let path = write_csv_file(dir.path(), date, &readings()).unwrap();

        assert_eq!(path, dir.path().join("DailyReport_2026-10-18.csv"));
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 4);
    }
}
