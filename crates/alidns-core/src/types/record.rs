//! DNS record model and format checks.
//!
//! The checks are deliberately shallow: non-blank fields, a positive TTL,
//! address syntax for A/AAAA, and a priority for MX. Anything deeper is left
//! to the DNS service, which rejects bad values with its own error codes.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Default TTL in seconds for new records.
pub const DEFAULT_TTL: u64 = 600;

/// Record types the editor offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    A,
    AAAA,
    CNAME,
    MX,
    TXT,
    NS,
    SRV,
    CAA,
    #[serde(rename = "REDIRECT_URL")]
    RedirectUrl,
    #[serde(rename = "FORWARD_URL")]
    ForwardUrl,
}

impl RecordType {
    pub const ALL: [RecordType; 10] = [
        RecordType::A,
        RecordType::AAAA,
        RecordType::CNAME,
        RecordType::MX,
        RecordType::TXT,
        RecordType::NS,
        RecordType::SRV,
        RecordType::CAA,
        RecordType::RedirectUrl,
        RecordType::ForwardUrl,
    ];

    /// Wire name used by the DNS API.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::CNAME => "CNAME",
            RecordType::MX => "MX",
            RecordType::TXT => "TXT",
            RecordType::NS => "NS",
            RecordType::SRV => "SRV",
            RecordType::CAA => "CAA",
            RecordType::RedirectUrl => "REDIRECT_URL",
            RecordType::ForwardUrl => "FORWARD_URL",
        }
    }

    /// Whether the API takes a `Priority` parameter for this type.
    pub fn uses_priority(&self) -> bool {
        matches!(self, RecordType::MX)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        RecordType::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| ValidationError::UnsupportedType(s.trim().to_string()))
    }
}

/// Enabled/disabled state of a record.
///
/// The API and older UI code use several spellings; [`RecordStatus::normalize`]
/// folds them. Unknown text is kept as-is rather than guessed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordStatus {
    Enabled,
    Disabled,
    Other(String),
}

impl RecordStatus {
    pub fn normalize(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.to_lowercase().as_str() {
            "enable" | "enabled" | "end" | "on" | "ok" => RecordStatus::Enabled,
            "disable" | "disabled" | "dis" | "off" => RecordStatus::Disabled,
            _ => RecordStatus::Other(raw.to_string()),
        }
    }

    /// Value for the `Status` parameter of `SetDomainRecordStatus`.
    pub fn as_api_str(&self) -> &str {
        match self {
            RecordStatus::Enabled => "Enable",
            RecordStatus::Disabled => "Disable",
            RecordStatus::Other(raw) => raw.as_str(),
        }
    }

    /// Localized display label.
    pub fn label(&self) -> &str {
        match self {
            RecordStatus::Enabled => "启用",
            RecordStatus::Disabled => "禁用",
            RecordStatus::Other(raw) => raw.as_str(),
        }
    }
}

impl From<String> for RecordStatus {
    fn from(raw: String) -> Self {
        RecordStatus::normalize(&raw)
    }
}

impl From<RecordStatus> for String {
    fn from(status: RecordStatus) -> Self {
        status.as_api_str().to_string()
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_str())
    }
}

/// Known resolution lines: (code, label).
const KNOWN_LINES: [(&str, &str); 6] = [
    ("default", "默认"),
    ("telecom", "电信"),
    ("unicom", "联通"),
    ("mobile", "移动"),
    ("oversea", "海外"),
    ("edu", "教育网"),
];

/// Resolution line code (`default`, `telecom`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineCode(String);

impl LineCode {
    pub const DEFAULT: &'static str = "default";

    /// Map a code or localized label to its code.
    ///
    /// Blank input is `default`; unrecognized lines pass through untouched so
    /// provider-specific lines keep working.
    pub fn normalize(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return LineCode(Self::DEFAULT.to_string());
        }

        let lowered = trimmed.to_lowercase();
        KNOWN_LINES
            .iter()
            .find(|(code, label)| *code == lowered || *label == trimmed)
            .map(|(code, _)| LineCode(code.to_string()))
            .unwrap_or_else(|| LineCode(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Localized display label; unknown codes display as themselves.
    pub fn label(&self) -> &str {
        KNOWN_LINES
            .iter()
            .find(|(code, _)| *code == self.0)
            .map(|(_, label)| *label)
            .unwrap_or(self.0.as_str())
    }
}

impl Default for LineCode {
    fn default() -> Self {
        LineCode(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for LineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A DNS record as returned by `DescribeDomainRecords`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    pub record_id: String,

    /// Host record, e.g. `www` or `@`.
    pub rr: String,

    /// Record type as reported; may be a type the editor does not offer.
    pub record_type: String,

    pub value: String,

    pub ttl: u64,

    pub priority: u64,

    pub line: LineCode,

    pub status: RecordStatus,

    pub locked: bool,
}

impl DnsRecord {
    /// See [`fqdn`].
    pub fn fqdn(&self, domain: &str) -> String {
        fqdn(&self.rr, domain)
    }
}

/// `rr.domain`, or the bare domain for `@` and an empty host record.
pub fn fqdn(rr: &str, domain: &str) -> String {
    match rr {
        "" | "@" => domain.to_string(),
        rr => format!("{rr}.{domain}"),
    }
}

/// The editable fields of a record, submitted for add and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    pub rr: String,
    pub record_type: RecordType,
    pub value: String,
    pub ttl: u64,
    pub priority: u64,
    pub line: LineCode,
}

impl RecordDraft {
    /// A draft with the default TTL, no priority, and the default line.
    pub fn new(rr: impl Into<String>, record_type: RecordType, value: impl Into<String>) -> Self {
        Self {
            rr: rr.into(),
            record_type,
            value: value.into(),
            ttl: DEFAULT_TTL,
            priority: 0,
            line: LineCode::default(),
        }
    }

    /// Start an edit from an existing record.
    pub fn from_record(record: &DnsRecord) -> Result<Self, ValidationError> {
        Ok(Self {
            rr: record.rr.clone(),
            record_type: record.record_type.parse()?,
            value: record.value.clone(),
            ttl: record.ttl,
            priority: record.priority,
            line: LineCode::normalize(record.line.as_str()),
        })
    }

    /// Trim text fields and normalize the line code.
    pub fn normalized(mut self) -> Self {
        self.rr = self.rr.trim().to_string();
        self.value = self.value.trim().to_string();
        self.line = LineCode::normalize(self.line.as_str());
        self
    }

    /// Check the draft, reporting the first problem found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.rr.trim().is_empty() {
            return Err(ValidationError::EmptyHostRecord);
        }

        let value = self.value.trim();
        if value.is_empty() {
            return Err(ValidationError::EmptyValue);
        }

        if self.ttl == 0 {
            return Err(ValidationError::InvalidTtl);
        }

        match self.record_type {
            RecordType::A if !is_valid_ipv4(value) => {
                Err(ValidationError::InvalidIpv4(value.to_string()))
            }
            RecordType::AAAA if !is_valid_ipv6(value) => {
                Err(ValidationError::InvalidIpv6(value.to_string()))
            }
            RecordType::MX if self.priority == 0 => Err(ValidationError::MissingMxPriority),
            _ => Ok(()),
        }
    }
}

pub fn is_valid_ipv4(value: &str) -> bool {
    value.parse::<Ipv4Addr>().is_ok()
}

pub fn is_valid_ipv6(value: &str) -> bool {
    value.parse::<Ipv6Addr>().is_ok()
}
