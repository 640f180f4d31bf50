//! Command implementations
//!
//! Single records print as pretty JSON, row streams as NDJSON.

pub mod applications;
pub mod event_types;

use std::io::{self, Write};

use anyhow::{Context, Result};
use futures::{Stream, TryStreamExt};
use serde::Serialize;

pub use applications::{run_app, AppArgs};
pub use event_types::{run_event_type, EventTypeArgs};

/// Print one record as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value).context("Failed to write JSON")?;
    writeln!(out)?;
    Ok(())
}

/// Drain a row stream to stdout, one JSON object per line. Returns the row count.
pub async fn print_ndjson<T, E, S>(rows: S) -> Result<usize>
where
    T: Serialize,
    E: std::error::Error + Send + Sync + 'static,
    S: Stream<Item = Result<T, E>> + Unpin,
{
    let mut rows = rows;
    let mut count = 0;
    while let Some(row) = rows.try_next().await? {
        let mut out = io::stdout().lock();
        serde_json::to_writer(&mut out, &row).context("Failed to write JSON")?;
        writeln!(out)?;
        count += 1;
    }
    Ok(count)
}
