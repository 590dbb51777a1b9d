// src/course.rs

use tracing::debug;

use crate::extract::CourseRecord;

/// First record whose `CRN` field equals `crn` exactly.
pub fn find_by_crn<'a>(records: &'a [CourseRecord], crn: &str) -> Option<&'a CourseRecord> {
    records.iter().find(|r| r.crn() == Some(crn))
}

/// Whether the section has no open seat.
///
/// `Enrl` and `Lim` default to 0 when absent. A value that is not an integer
/// makes the class count as full, so bad data never triggers an email.
pub fn is_class_full(record: &CourseRecord) -> bool {
    let enrl = record.get("Enrl").unwrap_or("0").parse::<i64>();
    let lim = record.get("Lim").unwrap_or("0").parse::<i64>();
    match (enrl, lim) {
        (Ok(enrl), Ok(lim)) => enrl >= lim,
        (enrl, lim) => {
            debug!(
                crn = record.crn().unwrap_or_default(),
                enrl_ok = enrl.is_ok(),
                lim_ok = lim.is_ok(),
                "unparsable capacity, treating as full"
            );
            true
        }
    }
}
