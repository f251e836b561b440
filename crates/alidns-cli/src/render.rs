//! Terminal rendering utilities.
//!
//! Tables for domains and records. Columns are padded by display width so
//! Chinese line and status labels stay aligned.

use alidns_core::{DnsRecord, DomainInfo, RecordStatus};
use console::{pad_str, style, Alignment};

fn cell(text: &str, width: usize) -> String {
    pad_str(text, width, Alignment::Left, Some("…")).into_owned()
}

/// Render the domain table.
pub fn render_domains(domains: &[DomainInfo]) {
    if domains.is_empty() {
        println!("No domains found.");
        return;
    }

    println!(
        "{}",
        style(format!(
            "{} {} {}",
            cell("DOMAIN", 36),
            cell("RECORDS", 8),
            "CREATED"
        ))
        .bold()
    );
    println!("{}", "-".repeat(72));
    for domain in domains {
        println!(
            "{} {} {}",
            cell(&domain.domain_name, 36),
            cell(&domain.record_count.to_string(), 8),
            domain.create_time
        );
    }
    println!("\n{} domain(s) total.", domains.len());
}

/// Render the record table for `domain`.
pub fn render_records(domain: &str, records: &[DnsRecord]) {
    if records.is_empty() {
        println!("No records found for {}.", domain);
        return;
    }

    println!(
        "{}",
        style(format!(
            "{} {} {} {} {} {} {} {}",
            cell("RECORD ID", 20),
            cell("RR", 16),
            cell("TYPE", 12),
            cell("VALUE", 32),
            cell("TTL", 6),
            cell("PRIO", 4),
            cell("LINE", 8),
            "STATUS"
        ))
        .bold()
    );
    println!("{}", "-".repeat(110));

    for record in records {
        let priority = if record.priority > 0 {
            record.priority.to_string()
        } else {
            String::new()
        };
        let status = match &record.status {
            RecordStatus::Enabled => style(record.status.label()).green(),
            RecordStatus::Disabled => style(record.status.label()).red(),
            RecordStatus::Other(_) => style(record.status.label()).yellow(),
        };
        let lock = if record.locked { " (locked)" } else { "" };

        println!(
            "{} {} {} {} {} {} {} {}{}",
            cell(&record.record_id, 20),
            cell(&record.rr, 16),
            cell(&record.record_type, 12),
            cell(&record.value, 32),
            cell(&record.ttl.to_string(), 6),
            cell(&priority, 4),
            cell(record.line.label(), 8),
            status,
            lock
        );
    }
    println!("\n{} record(s) total.", records.len());
}
