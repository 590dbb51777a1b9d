// src/pipeline.rs

use tracing::{info, instrument};

use crate::course::{find_by_crn, is_class_full};
use crate::error::Result;
use crate::extract::{extract_course_records, CourseRecord};
use crate::fetch::PageSource;
use crate::notify::Notifier;

/// What a single run decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    NotFound,
    Full(CourseRecord),
    Notified(CourseRecord),
}

/// Fetch the results page, find `crn` and send an alert if it has a free seat.
///
/// Every error aborts the run. Nothing is remembered between runs, so an open
/// seat is reported again on the next call.
#[instrument(level = "info", skip(source, notifier))]
pub async fn run<S, N>(source: &S, notifier: &N, crn: &str) -> Result<Outcome>
where
    S: PageSource,
    N: Notifier,
{
    let html = source.fetch_page().await?;
    let records = extract_course_records(&html)?;
    info!(records = records.len(), "parsed results table");

    let Some(record) = find_by_crn(&records, crn).cloned() else {
        info!("no class found with this CRN");
        return Ok(Outcome::NotFound);
    };
    info!(
        enrl = record.get("Enrl").unwrap_or_default(),
        lim = record.get("Lim").unwrap_or_default(),
        "found section"
    );

    if is_class_full(&record) {
        info!("section is full");
        return Ok(Outcome::Full(record));
    }

    info!("seat open, notifying");
    notifier.notify(&record).await?;
    Ok(Outcome::Notified(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WatchError;
    use std::sync::Mutex;

    struct StaticPage(String);

    impl PageSource for StaticPage {
        async fn fetch_page(&self) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<CourseRecord>>,
        fail: bool,
    }

    impl Notifier for Recorder {
        async fn notify(&self, record: &CourseRecord) -> Result<()> {
            if self.fail {
                return Err(WatchError::Notification("provider down".into()));
            }
            self.sent.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    fn page(enrl: &str, lim: &str) -> StaticPage {
        StaticPage(format!(
            r#"<div class="data-table"><table>
                <tr><th>CRN</th><th>Title</th><th>Enrl</th><th>Lim</th></tr>
                <tr><td><a href="/crn">91713</a></td><td>Other</td><td>1</td><td>30</td></tr>
                <tr><td><a href="/crn">91714</a></td><td>Software Design</td><td>{}</td><td>{}</td></tr>
            </table></div>"#,
            enrl, lim
        ))
    }

    #[tokio::test]
    async fn open_seat_notifies_once() {
        let notifier = Recorder::default();
        let outcome = run(&page("19", "20"), &notifier, "91714").await.unwrap();

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].crn(), Some("91714"));
        assert!(matches!(outcome, Outcome::Notified(ref r) if r.get("Enrl") == Some("19")));
    }

    #[tokio::test]
    async fn full_section_does_not_notify() {
        let notifier = Recorder::default();
        let outcome = run(&page("20", "20"), &notifier, "91714").await.unwrap();

        assert!(notifier.sent.lock().unwrap().is_empty());
        assert!(matches!(outcome, Outcome::Full(_)));
    }

    #[tokio::test]
    async fn unknown_crn_is_not_found() {
        let notifier = Recorder::default();
        let outcome = run(&page("0", "20"), &notifier, "00000").await.unwrap();

        assert_eq!(outcome, Outcome::NotFound);
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn page_without_table_aborts_run() {
        let notifier = Recorder::default();
        let source = StaticPage("<p>No courses found</p>".into());
        let err = run(&source, &notifier, "91714").await.unwrap_err();
        assert!(matches!(err, WatchError::Extraction(_)));
    }

    #[tokio::test]
    async fn notifier_failure_propagates() {
        let notifier = Recorder {
            fail: true,
            ..Default::default()
        };
        let err = run(&page("5", "20"), &notifier, "91714").await.unwrap_err();
        assert!(matches!(err, WatchError::Notification(_)));
    }
}
