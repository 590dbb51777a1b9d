// src/extract/mod.rs

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument, warn};

use crate::error::{Result, WatchError};

mod record;

pub use record::CourseRecord;

static DATA_TABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.data-table > table").expect("data table selector"));
static HEADER_CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("th").expect("th selector"));
static DATA_CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("td selector"));
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("a selector"));
static IMAGE: Lazy<Selector> = Lazy::new(|| Selector::parse("img").expect("img selector"));

/// Parse the registrar's results page into one record per course section.
///
/// The page does not give every section its own row markup, so rows are
/// rebuilt by cutting the flat list of `td` values into header-sized chunks.
/// A trailing chunk shorter than the header count is dropped.
#[instrument(level = "debug", skip(html), fields(html_len = html.len()))]
pub fn extract_course_records(html: &str) -> Result<Vec<CourseRecord>> {
    let doc = Html::parse_document(html);
    let table = doc.select(&DATA_TABLE).next().ok_or_else(|| {
        WatchError::Extraction("no table inside a `data-table` container".to_string())
    })?;

    let headers: Vec<String> = table
        .select(&HEADER_CELL)
        .map(|th| text_of(th).trim().to_string())
        .collect();
    let cells: Vec<String> = table.select(&DATA_CELL).map(cell_value).collect();
    debug!(headers = headers.len(), cells = cells.len(), "scanned data table");

    if headers.is_empty() {
        warn!(cells = cells.len(), "data table has no header cells");
        return Ok(Vec::new());
    }

    let leftover = cells.len() % headers.len();
    if leftover != 0 {
        warn!(
            leftover,
            columns = headers.len(),
            "dropping partial trailing row"
        );
    }

    let records: Vec<CourseRecord> = cells
        .chunks_exact(headers.len())
        .map(|row| CourseRecord::from_row(&headers, row))
        .collect();
    debug!(records = records.len(), "extracted course records");
    Ok(records)
}

/// A cell's value: link text if it holds a link, else an image's `src`,
/// else its own text.
fn cell_value(td: ElementRef<'_>) -> String {
    if let Some(a) = td.select(&LINK).next() {
        return text_of(a).trim().to_string();
    }
    if let Some(img) = td.select(&IMAGE).next() {
        return img.value().attr("src").unwrap_or("").trim().to_string();
    }
    text_of(td).trim().to_string()
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}
