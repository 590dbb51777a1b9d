// src/notify/mod.rs

use std::future::Future;

use crate::error::Result;
use crate::extract::CourseRecord;

mod resend;

pub use resend::ResendNotifier;

/// Delivers the "seat open" message for a course section.
pub trait Notifier {
    fn notify(&self, record: &CourseRecord) -> impl Future<Output = Result<()>> + Send;
}

/// Subject line and HTML body of an opening alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningMessage {
    pub subject: String,
    pub html: String,
}

impl OpeningMessage {
    pub fn for_record(record: &CourseRecord) -> Self {
        let field = |name: &str| record.get(name).unwrap_or("unknown");
        let markup = |name: &str| escape_html(field(name));
        let (title, crn) = (markup("Title"), markup("CRN"));
        let (instructor, enrl, lim) = (markup("Instructor"), markup("Enrl"), markup("Lim"));

        OpeningMessage {
            subject: format!("{} has an opening; CRN: {}", field("Title"), field("CRN")),
            html: format!(
                "<strong>{title} with {instructor} has an opening.<br><br>\
                 The CRN: {crn}.</strong><br><br>\
                 There are {enrl} students enrolled and the limit is {lim}."
            ),
        }
    }
}

/// Cell text arrives entity-decoded, so re-escape it before it goes into markup.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
