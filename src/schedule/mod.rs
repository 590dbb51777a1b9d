// src/schedule/mod.rs

use chrono::{DateTime, TimeDelta, Timelike, Utc};

use crate::error::Result;

mod cron;

pub use cron::CronExpr;

/// Polling windows, in UTC: every five minutes 10:00-23:55 Monday to Friday,
/// and 00:00-05:55 Tuesday to Saturday to cover the US evenings.
pub const DEFAULT_WINDOWS: [&str; 2] = ["*/5 10-23 * * MON-FRI", "*/5 0-5 * * TUE-SAT"];

/// Longest gap searched for the next tick.
const HORIZON_MINUTES: i64 = 366 * 24 * 60;

/// A set of cron windows; a minute is due when any window matches it.
#[derive(Debug, Clone)]
pub struct Schedule {
    windows: Vec<CronExpr>,
}

impl Schedule {
    pub fn parse<I, S>(exprs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let windows = exprs
            .into_iter()
            .map(|e| e.as_ref().parse())
            .collect::<Result<Vec<CronExpr>>>()?;
        Ok(Schedule { windows })
    }

    pub fn default_windows() -> Result<Self> {
        Self::parse(DEFAULT_WINDOWS)
    }

    pub fn windows(&self) -> &[CronExpr] {
        &self.windows
    }

    pub fn is_due(&self, t: &DateTime<Utc>) -> bool {
        self.windows.iter().any(|w| w.matches(t))
    }

    /// First due minute strictly after `t`, at second zero.
    pub fn next_after(&self, t: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let mut candidate = t.with_second(0)?.with_nanosecond(0)? + TimeDelta::minutes(1);
        for _ in 0..HORIZON_MINUTES {
            if self.is_due(&candidate) {
                return Some(candidate);
            }
            candidate += TimeDelta::minutes(1);
        }
        None
    }

    /// Next tick to wait for, never at or before `last`.
    ///
    /// The sleep runs on a monotonic clock while `now` is wall time, so a wall
    /// clock stepped back can wake the loop just short of the tick it already ran.
    pub fn next_tick(
        &self,
        now: DateTime<Utc>,
        last: Option<DateTime<Utc>>,
    ) -> Option<DateTime<Utc>> {
        let from = last.map_or(now, |last| now.max(last));
        self.next_after(from)
    }
}
