// src/schedule/cron.rs

use std::str::FromStr;

use chrono::{DateTime, Datelike, TimeZone, Timelike};

use crate::error::WatchError;

const WEEKDAYS: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

/// (name, min, max) of the five fields, in order.
const FIELDS: [(&str, u32, u32); 5] = [
    ("minute", 0, 59),
    ("hour", 0, 23),
    ("day-of-month", 1, 31),
    ("month", 1, 12),
    ("day-of-week", 0, 6),
];

/// A five-field cron expression: `minute hour day-of-month month day-of-week`.
///
/// Each field is `*`, `*/n`, `a`, `a-b` or a comma list of those; weekdays may
/// be written `SUN`..`SAT`. All five fields must match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronExpr {
    source: String,
    /// Allowed values per field, one bit each.
    fields: [u64; 5],
}

impl CronExpr {
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the expression fires in the minute containing `t`.
    pub fn matches<Tz: TimeZone>(&self, t: &DateTime<Tz>) -> bool {
        let values = [
            t.minute(),
            t.hour(),
            t.day(),
            t.month(),
            t.weekday().num_days_from_sunday(),
        ];
        self.fields
            .iter()
            .zip(values)
            .all(|(bits, v)| bits & (1u64 << v) != 0)
    }
}

impl FromStr for CronExpr {
    type Err = WatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |why: String| WatchError::Config(format!("cron {:?}: {}", s, why));

        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.len() != FIELDS.len() {
            return Err(err(format!("expected 5 fields, got {}", parts.len())));
        }

        let mut fields = [0u64; 5];
        for (i, (raw, &(name, min, max))) in parts.iter().zip(FIELDS.iter()).enumerate() {
            fields[i] = parse_field(raw, min, max)
                .map_err(|why| err(format!("{} field: {}", name, why)))?;
        }

        Ok(CronExpr {
            source: s.trim().to_string(),
            fields,
        })
    }
}

fn parse_field(raw: &str, min: u32, max: u32) -> Result<u64, String> {
    let mut bits = 0u64;
    for part in raw.split(',') {
        let (lo, hi, step) = if part == "*" {
            (min, max, 1)
        } else if let Some(step) = part.strip_prefix("*/") {
            let step: usize = step.parse().map_err(|_| format!("bad step {:?}", step))?;
            if step == 0 {
                return Err("step must be positive".into());
            }
            (min, max, step)
        } else if let Some((a, b)) = part.split_once('-') {
            (value(a, min, max)?, value(b, min, max)?, 1)
        } else {
            let v = value(part, min, max)?;
            (v, v, 1)
        };
        if lo > hi {
            return Err(format!("range {}-{} is reversed", lo, hi));
        }
        for v in (lo..=hi).step_by(step) {
            bits |= 1u64 << v;
        }
    }
    Ok(bits)
}

fn value(token: &str, min: u32, max: u32) -> Result<u32, String> {
    let upper = token.to_ascii_uppercase();
    let v = match WEEKDAYS.iter().position(|d| *d == upper) {
        Some(idx) if max == 6 => idx as u32,
        _ => token
            .parse::<u32>()
            .map_err(|_| format!("bad value {:?}", token))?,
    };
    if !(min..=max).contains(&v) {
        return Err(format!("{} out of range {}-{}", v, min, max));
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.from_utc_datetime(
            &NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, min, 0)
                .unwrap(),
        )
    }

    #[test]
    fn weekday_window_every_five_minutes() {
        let cron: CronExpr = "*/5 10-23 * * MON-FRI".parse().unwrap();
        // 2024-09-16 is a Monday
        assert!(cron.matches(&at(2024, 9, 16, 10, 0)));
        assert!(cron.matches(&at(2024, 9, 16, 23, 55)));
        assert!(!cron.matches(&at(2024, 9, 16, 10, 3)));
        assert!(!cron.matches(&at(2024, 9, 16, 9, 55)));
        // Saturday
        assert!(!cron.matches(&at(2024, 9, 21, 12, 0)));
    }

    #[test]
    fn overnight_window_runs_tuesday_to_saturday() {
        let cron: CronExpr = "*/5 0-5 * * TUE-SAT".parse().unwrap();
        assert!(cron.matches(&at(2024, 9, 17, 0, 0)));
        assert!(cron.matches(&at(2024, 9, 21, 5, 55)));
        assert!(!cron.matches(&at(2024, 9, 16, 1, 0)));
        assert!(!cron.matches(&at(2024, 9, 17, 6, 0)));
    }

    #[test]
    fn lists_and_numeric_weekdays() {
        let cron: CronExpr = "0,30 9 * 1-3 0,6".parse().unwrap();
        // 2024-01-07 is a Sunday, 2024-01-08 a Monday
        assert!(cron.matches(&at(2024, 1, 7, 9, 30)));
        assert!(!cron.matches(&at(2024, 1, 8, 9, 30)));
        assert!(!cron.matches(&at(2024, 4, 7, 9, 30)));
    }

    #[test]
    fn malformed_expressions_are_rejected() {
        for bad in [
            "* * * *",
            "61 * * * *",
            "*/0 * * * *",
            "5-1 * * * *",
            "* * * * FUNDAY",
            "* * * * 7",
            "MON * * * *",
        ] {
            assert!(bad.parse::<CronExpr>().is_err(), "{} should not parse", bad);
        }
    }
}
