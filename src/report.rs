//! Console output for an audit run. Everything here writes to the sink it is
//! given so the exact text can be asserted in tests.

use crate::error::FetchError;
use crate::models::splunk::UpdateResult;
use std::io::{Result, Write};

pub fn no_instances<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "No Splunk instances provided. Exiting.")
}

pub fn instance_header<W: Write>(out: &mut W, instance: &str) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "Checking Splunk instance: {}", instance)
}

pub fn fetch_failure<W: Write>(out: &mut W, instance: &str, err: &FetchError) -> Result<()> {
    match err {
        FetchError::Status(_) => writeln!(out, "Error fetching apps from {}: {}", instance, err),
        _ => writeln!(
            out,
            "Error occurred while fetching apps from {}: {}",
            instance, err
        ),
    }
}

pub fn skipped_entries<W: Write>(out: &mut W, instance: &str, skipped: usize) -> Result<()> {
    writeln!(
        out,
        "Skipped {} malformed app entr{} from {}.",
        skipped,
        if skipped == 1 { "y" } else { "ies" },
        instance
    )
}

pub fn no_apps<W: Write>(out: &mut W, instance: &str) -> Result<()> {
    writeln!(out, "No apps found or error occurred on {}.", instance)
}

pub fn updates<W: Write>(out: &mut W, instance: &str, updates: &[UpdateResult]) -> Result<()> {
    if updates.is_empty() {
        return writeln!(out, "No apps have updates available on {}.", instance);
    }

    writeln!(out, "The following apps on {} have updates available:", instance)?;
    for update in updates {
        writeln!(out, "- {}", update)?;
    }
    Ok(())
}

pub fn summary<W: Write>(out: &mut W, instances: usize, failed: usize, updates: usize) -> Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Checked {} instance(s): {} with errors, {} app update(s) available.",
        instances, failed, updates
    )
}
