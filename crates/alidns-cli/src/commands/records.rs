//! DNS record commands.

use alidns_client::DnsApi;
use alidns_core::{LineCode, RecordDraft, RecordStatus, RecordType, Settings};
use clap::Args;
use console::style;

use crate::render;

/// Records command arguments.
#[derive(Args)]
pub struct RecordsArgs {
    #[command(subcommand)]
    pub command: RecordsCommand,
}

/// Record fields for `add`.
#[derive(Args, Debug)]
pub struct RecordFields {
    /// Host record, e.g. `www` or `@`
    #[arg(long)]
    pub rr: String,

    /// Record type (A, AAAA, CNAME, MX, TXT, NS, SRV, CAA, REDIRECT_URL, FORWARD_URL)
    #[arg(long = "type")]
    pub record_type: RecordType,

    /// Record value
    #[arg(long)]
    pub value: String,

    /// TTL in seconds (defaults to `records.default_ttl`)
    #[arg(long)]
    pub ttl: Option<u64>,

    /// MX priority
    #[arg(long)]
    pub priority: Option<u64>,

    /// Resolution line code or label (defaults to `records.default_line`)
    #[arg(long)]
    pub line: Option<String>,
}

impl RecordFields {
    /// Build a draft, filling unset fields from the settings.
    pub fn into_draft(self, settings: &Settings) -> RecordDraft {
        let mut draft = RecordDraft::new(self.rr, self.record_type, self.value);
        draft.ttl = self.ttl.unwrap_or(settings.records.default_ttl);
        draft.priority = self.priority.unwrap_or(0);
        draft.line = LineCode::normalize(
            self.line
                .as_deref()
                .unwrap_or(&settings.records.default_line),
        );
        draft.normalized()
    }
}

/// Field changes for `update`; unset fields keep their current value.
#[derive(Args, Debug, Default)]
pub struct RecordChanges {
    /// New host record
    #[arg(long)]
    pub rr: Option<String>,

    /// New record type
    #[arg(long = "type")]
    pub record_type: Option<RecordType>,

    /// New record value
    #[arg(long)]
    pub value: Option<String>,

    /// New TTL in seconds
    #[arg(long)]
    pub ttl: Option<u64>,

    /// New MX priority
    #[arg(long)]
    pub priority: Option<u64>,

    /// New resolution line code or label
    #[arg(long)]
    pub line: Option<String>,
}

impl RecordChanges {
    /// Apply the changes on top of `draft`.
    pub fn apply(self, mut draft: RecordDraft) -> RecordDraft {
        if let Some(rr) = self.rr {
            draft.rr = rr;
        }
        if let Some(record_type) = self.record_type {
            draft.record_type = record_type;
        }
        if let Some(value) = self.value {
            draft.value = value;
        }
        if let Some(ttl) = self.ttl {
            draft.ttl = ttl;
        }
        if let Some(priority) = self.priority {
            draft.priority = priority;
        }
        if let Some(line) = self.line {
            draft.line = LineCode::normalize(&line);
        }
        draft.normalized()
    }
}

#[derive(clap::Subcommand)]
pub enum RecordsCommand {
    /// List the records of a domain
    List {
        /// Domain name
        domain: String,

        /// Only show records of this type
        #[arg(long = "type")]
        record_type: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Add a record
    Add {
        /// Domain name
        domain: String,

        #[command(flatten)]
        fields: RecordFields,
    },

    /// Change fields of a record
    Update {
        /// Record ID
        record_id: String,

        /// Domain the record belongs to
        #[arg(long)]
        domain: String,

        #[command(flatten)]
        changes: RecordChanges,
    },

    /// Delete a record
    Delete {
        /// Record ID
        record_id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Enable a record
    Enable {
        /// Record ID
        record_id: String,
    },

    /// Disable a record
    Disable {
        /// Record ID
        record_id: String,
    },
}

/// Run the records command.
pub async fn run(args: RecordsArgs, settings: &Settings) -> anyhow::Result<()> {
    match args.command {
        RecordsCommand::List {
            domain,
            record_type,
            json,
        } => {
            let client = super::saved_client(settings)?;
            let mut records = client.list_records(&domain).await?;
            if let Some(wanted) = record_type {
                records.retain(|r| r.record_type.eq_ignore_ascii_case(wanted.trim()));
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                render::render_records(&domain, &records);
            }
        }

        RecordsCommand::Add { domain, fields } => {
            // Checked before credentials are needed.
            let draft = fields.into_draft(settings);
            draft.validate()?;

            let client = super::saved_client(settings)?;
            let record_id = client.add_record(&domain, &draft).await?;
            println!(
                "{} Added {} record {} (ID {})",
                style("✓").green(),
                draft.record_type,
                style(alidns_core::fqdn(&draft.rr, &domain)).bold(),
                record_id
            );
        }

        RecordsCommand::Update {
            record_id,
            domain,
            changes,
        } => {
            let client = super::saved_client(settings)?;
            let current = client
                .list_records(&domain)
                .await?
                .into_iter()
                .find(|r| r.record_id == record_id)
                .ok_or_else(|| anyhow::anyhow!("Record {} not found in {}", record_id, domain))?;
            if current.locked {
                anyhow::bail!("Record {} is locked", record_id);
            }

            let draft = changes.apply(RecordDraft::from_record(&current)?);
            draft.validate()?;

            client.update_record(&record_id, &draft).await?;
            println!("{} Updated record {}", style("✓").green(), record_id);
        }

        RecordsCommand::Delete { record_id, yes } => {
            if !yes && !super::confirm(&format!("Delete record {}?", record_id))? {
                println!("Aborted.");
                return Ok(());
            }

            let client = super::saved_client(settings)?;
            client.delete_record(&record_id).await?;
            println!("{} Deleted record {}", style("✓").green(), record_id);
        }

        RecordsCommand::Enable { record_id } => {
            set_status(settings, &record_id, RecordStatus::Enabled).await?;
        }

        RecordsCommand::Disable { record_id } => {
            set_status(settings, &record_id, RecordStatus::Disabled).await?;
        }
    }

    Ok(())
}

async fn set_status(
    settings: &Settings,
    record_id: &str,
    status: RecordStatus,
) -> anyhow::Result<()> {
    let client = super::saved_client(settings)?;
    client.set_record_status(record_id, &status).await?;
    println!(
        "{} Record {} is now {}",
        style("✓").green(),
        record_id,
        status.label()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(record_type: RecordType, value: &str) -> RecordFields {
        RecordFields {
            rr: " www ".to_string(),
            record_type,
            value: value.to_string(),
            ttl: None,
            priority: None,
            line: None,
        }
    }

    #[test]
    fn test_into_draft_uses_settings_defaults() {
        let mut settings = Settings::default();
        settings.records.default_ttl = 300;
        settings.records.default_line = "联通".to_string();

        let draft = fields(RecordType::A, "192.0.2.1").into_draft(&settings);
        assert_eq!(draft.rr, "www");
        assert_eq!(draft.ttl, 300);
        assert_eq!(draft.line.as_str(), "unicom");
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_into_draft_explicit_values_win() {
        let mut f = fields(RecordType::MX, "mx.example.com");
        f.ttl = Some(60);
        f.priority = Some(5);
        f.line = Some("telecom".to_string());

        let draft = f.into_draft(&Settings::default());
        assert_eq!(draft.ttl, 60);
        assert_eq!(draft.priority, 5);
        assert_eq!(draft.line.as_str(), "telecom");
    }

    #[test]
    fn test_changes_keep_unset_fields() {
        let current = RecordDraft::new("www", RecordType::A, "192.0.2.1");
        let changes = RecordChanges {
            value: Some(" 192.0.2.2 ".to_string()),
            line: Some("移动".to_string()),
            ..Default::default()
        };

        let draft = changes.apply(current);
        assert_eq!(draft.rr, "www");
        assert_eq!(draft.record_type, RecordType::A);
        assert_eq!(draft.value, "192.0.2.2");
        assert_eq!(draft.line.as_str(), "mobile");
    }
}
