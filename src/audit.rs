use crate::api::SplunkClient;
use crate::models::splunk::Inventory;
use crate::report;
use crate::updates;
use log::{error, info, warn};
use std::io::{self, Write};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AuditSummary {
    pub instances: usize,
    pub failed: usize,
    pub updates: usize,
}

/// Audits each instance in turn. A failure on one instance is reported and
/// the run moves on to the next.
pub async fn run<W: Write>(
    client: &SplunkClient,
    instances: &[String],
    out: &mut W,
) -> io::Result<AuditSummary> {
    let mut summary = AuditSummary::default();

    for instance in instances {
        summary.instances += 1;
        report::instance_header(out, instance)?;

        let inventory = match client.installed_apps(instance).await {
            Ok(inventory) => inventory,
            Err(e) => {
                error!("Fetching apps from {} failed: {}", instance, e);
                report::fetch_failure(out, instance, &e)?;
                summary.failed += 1;
                Inventory::default()
            }
        };

        if inventory.skipped > 0 {
            warn!("{} malformed app entries skipped on {}", inventory.skipped, instance);
            report::skipped_entries(out, instance, inventory.skipped)?;
        }

        if inventory.apps.is_empty() {
            report::no_apps(out, instance)?;
            continue;
        }

        let pending = updates::detect(&inventory.apps);
        info!(
            "{}: {} app(s) installed, {} with updates",
            instance,
            inventory.apps.len(),
            pending.len()
        );
        summary.updates += pending.len();
        report::updates(out, instance, &pending)?;
    }

    Ok(summary)
}
