use chrono::NaiveDateTime;

use crate::tank::TankGroup;

const CAPTURED_AT_FORMAT: &str = "%d-%m-%Y %H:%M";

#[derive(Debug, Clone, PartialEq)]
pub struct TankReading {
    pub tank_code: String,

    pub weight: Option<f64>,

    pub level: Option<f64>,

    pub temperature: Option<f64>,

    pub captured_at: NaiveDateTime,
}

impl TankReading {
    pub fn group(&self) -> Option<TankGroup> {
        TankGroup::of(&self.tank_code)
    }

    pub fn formatted_captured_at(&self) -> String {
        self.captured_at.format(CAPTURED_AT_FORMAT).to_string()
    }
}

/// Two decimal places; a value the database could not turn into a number is left blank.
pub fn format_value(v: Option<f64>) -> String {
    match v {
        Some(v) if v.is_finite() => format!("{v:.2}"),
        _ => String::new(),
    }
}
