//! Response bodies of the DNS OpenAPI (JSON format).

use alidns_core::{DnsRecord, DomainInfo, LineCode, RecordStatus};
use serde::Deserialize;

/// Error body returned with a non-2xx status.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct ErrorBody {
    pub code: String,
    pub message: String,
    pub request_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct DescribeDomainsResponse {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub domains: DomainList,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct DomainList {
    #[serde(default)]
    pub domain: Vec<WireDomain>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct WireDomain {
    pub domain_name: String,
    #[serde(default)]
    pub domain_id: String,
    #[serde(default)]
    pub record_count: u64,
    #[serde(default)]
    pub create_time: String,
}

impl From<WireDomain> for DomainInfo {
    fn from(d: WireDomain) -> Self {
        DomainInfo {
            domain_name: d.domain_name,
            domain_id: d.domain_id,
            record_count: d.record_count,
            create_time: d.create_time,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct DescribeDomainRecordsResponse {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub domain_records: RecordList,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RecordList {
    #[serde(default)]
    pub record: Vec<WireRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireRecord {
    #[serde(rename = "RecordId")]
    pub record_id: String,
    #[serde(rename = "RR")]
    pub rr: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "TTL", default)]
    pub ttl: u64,
    #[serde(rename = "Priority", default)]
    pub priority: Option<u64>,
    #[serde(rename = "Line", default)]
    pub line: String,
    #[serde(rename = "Status", default)]
    pub status: String,
    #[serde(rename = "Locked", default)]
    pub locked: bool,
}

impl From<WireRecord> for DnsRecord {
    fn from(r: WireRecord) -> Self {
        DnsRecord {
            record_id: r.record_id,
            rr: r.rr,
            record_type: r.record_type,
            value: r.value,
            ttl: r.ttl,
            priority: r.priority.unwrap_or(0),
            line: LineCode::normalize(&r.line),
            status: RecordStatus::normalize(&r.status),
            locked: r.locked,
        }
    }
}

/// Body of the record mutation actions.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RecordIdResponse {
    #[serde(default)]
    pub record_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_records() {
        let json = r#"{
            "TotalCount": 2,
            "PageNumber": 1,
            "PageSize": 100,
            "RequestId": "req",
            "DomainRecords": {
                "Record": [
                    {"RecordId": "1", "RR": "www", "Type": "A", "Value": "192.0.2.1",
                     "TTL": 600, "Line": "default", "Status": "ENABLE", "Locked": false},
                    {"RecordId": "2", "RR": "@", "Type": "MX", "Value": "mx.example.com",
                     "TTL": 3600, "Priority": 10, "Line": "telecom", "Status": "DISABLE"}
                ]
            }
        }"#;

        let parsed: DescribeDomainRecordsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.total_count, 2);

        let records: Vec<DnsRecord> = parsed
            .domain_records
            .record
            .into_iter()
            .map(DnsRecord::from)
            .collect();
        assert_eq!(records[0].priority, 0);
        assert_eq!(records[0].status, RecordStatus::Enabled);
        assert_eq!(records[1].priority, 10);
        assert_eq!(records[1].line.as_str(), "telecom");
        assert_eq!(records[1].status, RecordStatus::Disabled);
        assert!(!records[1].locked);
    }

    #[test]
    fn test_decode_empty_domain_list() {
        let parsed: DescribeDomainsResponse =
            serde_json::from_str(r#"{"TotalCount": 0, "Domains": {"Domain": []}}"#).unwrap();
        assert!(parsed.domains.domain.is_empty());

        let parsed: DescribeDomainsResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.total_count, 0);
    }

    #[test]
    fn test_decode_error_body() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"Code": "InvalidAccessKeyId.NotFound", "Message": "Specified access key is not found.", "RequestId": "abc"}"#,
        )
        .unwrap();
        assert_eq!(body.code, "InvalidAccessKeyId.NotFound");
        assert_eq!(body.request_id, "abc");
    }
}
