pub mod config;
pub mod course;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod notify;
pub mod pipeline;
pub mod schedule;

pub use config::Config;
pub use error::{Result, WatchError};
pub use extract::{extract_course_records, CourseRecord};

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global fmt subscriber, honouring `RUST_LOG` and falling back to `info`.
pub fn init_tracing() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
}
