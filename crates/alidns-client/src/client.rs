//! The DNS API trait and its Alibaba Cloud implementation.

use std::time::Duration;

use alidns_core::config::EndpointConfig;
use alidns_core::{DnsRecord, DomainInfo, RecordDraft, RecordStatus, SecretString, Settings};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ApiError, Result};
use crate::signing::{self, SigningInput};
use crate::wire::{
    DescribeDomainRecordsResponse, DescribeDomainsResponse, ErrorBody, RecordIdResponse,
};

/// OpenAPI version of the DNS product.
pub const API_VERSION: &str = "2015-01-09";

/// Page size for list calls.
pub const PAGE_SIZE: u64 = 100;

/// Operations on hosted domains and their records.
#[async_trait]
pub trait DnsApi: Send + Sync {
    /// Every domain on the account.
    async fn list_domains(&self) -> Result<Vec<DomainInfo>>;

    /// Every record under `domain`.
    async fn list_records(&self, domain: &str) -> Result<Vec<DnsRecord>>;

    /// Create a record, returning its id.
    async fn add_record(&self, domain: &str, draft: &RecordDraft) -> Result<String>;

    /// Replace the editable fields of a record.
    async fn update_record(&self, record_id: &str, draft: &RecordDraft) -> Result<()>;

    async fn delete_record(&self, record_id: &str) -> Result<()>;

    /// Enable or disable a record.
    async fn set_record_status(&self, record_id: &str, status: &RecordStatus) -> Result<()>;
}

/// Client for the Alibaba Cloud DNS OpenAPI.
pub struct AliDnsClient {
    http: Client,
    base_url: Url,
    host: String,
    access_key_id: String,
    access_key_secret: SecretString,
}

impl AliDnsClient {
    /// Create a client for `endpoint` with the given AccessKey pair.
    ///
    /// Fails with [`ApiError::NotConfigured`] when either half is blank.
    pub fn new(
        access_key_id: &str,
        access_key_secret: &SecretString,
        endpoint: &EndpointConfig,
    ) -> Result<Self> {
        let access_key_id = access_key_id.trim();
        if access_key_id.is_empty() || access_key_secret.expose_secret().trim().is_empty() {
            return Err(ApiError::NotConfigured);
        }

        let base_url = parse_endpoint(&endpoint.url)?;
        let host = host_header(&base_url)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(endpoint.timeout_secs))
            .build()
            .map_err(|e| ApiError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            host,
            access_key_id: access_key_id.to_string(),
            access_key_secret: access_key_secret.clone(),
        })
    }

    /// Create a client using the endpoint from `settings`.
    pub fn from_settings(
        access_key_id: &str,
        access_key_secret: &SecretString,
        settings: &Settings,
    ) -> Result<Self> {
        Self::new(access_key_id, access_key_secret, &settings.endpoint)
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.base_url
    }

    /// Check that the credentials are accepted, with a one-page domain listing.
    pub async fn verify(&self) -> Result<()> {
        let _: DescribeDomainsResponse = self
            .call(
                "DescribeDomains",
                vec![param("PageNumber", 1), param("PageSize", 1)],
            )
            .await?;
        info!("credentials accepted by {}", self.host);
        Ok(())
    }

    /// Send one signed RPC call and decode the success body.
    async fn call<T: DeserializeOwned>(
        &self,
        action: &str,
        params: Vec<(String, String)>,
    ) -> Result<T> {
        let date = Utc::now().format(signing::DATE_FORMAT).to_string();
        let nonce = uuid::Uuid::new_v4().simple().to_string();

        let input = SigningInput {
            method: "POST",
            host: &self.host,
            action,
            version: API_VERSION,
            query: &params,
            body: b"",
            date: &date,
            nonce: &nonce,
        };
        let headers = signing::sign(
            &input,
            &self.access_key_id,
            self.access_key_secret.expose_secret(),
        )?;

        let mut url = self.base_url.clone();
        url.set_path("/");
        let query = signing::canonical_query(&params);
        url.set_query((!query.is_empty()).then_some(query.as_str()));

        let mut request = self.http.post(url);
        for (name, value) in headers {
            // reqwest derives Host from the URL.
            if name != "host" {
                request = request.header(name, value);
            }
        }

        debug!(action, "DNS API request");

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(error_from_body(status.as_u16(), &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| ApiError::decode(format!("{action} response: {e}")))
    }

    /// Parameters shared by add and update.
    fn draft_params(draft: &RecordDraft) -> Vec<(String, String)> {
        let mut params = vec![
            param("RR", &draft.rr),
            param("Type", draft.record_type),
            param("Value", &draft.value),
            param("TTL", draft.ttl),
            param("Line", draft.line.as_str()),
        ];
        if draft.record_type.uses_priority() {
            params.push(param("Priority", draft.priority));
        }
        params
    }

    fn checked(draft: &RecordDraft) -> Result<RecordDraft> {
        let draft = draft.clone().normalized();
        draft.validate()?;
        Ok(draft)
    }
}

#[async_trait]
impl DnsApi for AliDnsClient {
    async fn list_domains(&self) -> Result<Vec<DomainInfo>> {
        let mut domains = Vec::new();
        let mut page = 1u64;

        loop {
            let response: DescribeDomainsResponse = self
                .call(
                    "DescribeDomains",
                    vec![param("PageNumber", page), param("PageSize", PAGE_SIZE)],
                )
                .await?;

            let received = response.domains.domain.len();
            domains.extend(response.domains.domain.into_iter().map(DomainInfo::from));

            if received == 0 || domains.len() as u64 >= response.total_count {
                break;
            }
            page += 1;
        }

        debug!(count = domains.len(), "listed domains");
        Ok(domains)
    }

    async fn list_records(&self, domain: &str) -> Result<Vec<DnsRecord>> {
        let mut records = Vec::new();
        let mut page = 1u64;

        loop {
            let response: DescribeDomainRecordsResponse = self
                .call(
                    "DescribeDomainRecords",
                    vec![
                        param("DomainName", domain),
                        param("PageNumber", page),
                        param("PageSize", PAGE_SIZE),
                    ],
                )
                .await?;

            let received = response.domain_records.record.len();
            records.extend(response.domain_records.record.into_iter().map(DnsRecord::from));

            if received == 0 || records.len() as u64 >= response.total_count {
                break;
            }
            page += 1;
        }

        debug!(domain, count = records.len(), "listed records");
        Ok(records)
    }

    async fn add_record(&self, domain: &str, draft: &RecordDraft) -> Result<String> {
        let draft = Self::checked(draft)?;
        let mut params = vec![param("DomainName", domain)];
        params.extend(Self::draft_params(&draft));

        let response: RecordIdResponse = self.call("AddDomainRecord", params).await?;
        info!(domain, record_id = %response.record_id, "added record");
        Ok(response.record_id)
    }

    async fn update_record(&self, record_id: &str, draft: &RecordDraft) -> Result<()> {
        let draft = Self::checked(draft)?;
        let mut params = vec![param("RecordId", record_id)];
        params.extend(Self::draft_params(&draft));

        let _: RecordIdResponse = self.call("UpdateDomainRecord", params).await?;
        info!(record_id, "updated record");
        Ok(())
    }

    async fn delete_record(&self, record_id: &str) -> Result<()> {
        let _: RecordIdResponse = self
            .call("DeleteDomainRecord", vec![param("RecordId", record_id)])
            .await?;
        info!(record_id, "deleted record");
        Ok(())
    }

    async fn set_record_status(&self, record_id: &str, status: &RecordStatus) -> Result<()> {
        let _: RecordIdResponse = self
            .call(
                "SetDomainRecordStatus",
                vec![
                    param("RecordId", record_id),
                    param("Status", status.as_api_str()),
                ],
            )
            .await?;
        info!(record_id, status = %status, "changed record status");
        Ok(())
    }
}

fn param(name: &str, value: impl ToString) -> (String, String) {
    (name.to_string(), value.to_string())
}

/// Accept either a bare host name or a full URL.
fn parse_endpoint(raw: &str) -> Result<Url> {
    let raw = raw.trim().trim_end_matches('/');
    if raw.is_empty() {
        return Err(ApiError::config("endpoint is empty"));
    }

    let with_scheme = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    };

    Url::parse(&with_scheme).map_err(|e| ApiError::config(format!("invalid endpoint {raw}: {e}")))
}

fn host_header(url: &Url) -> Result<String> {
    let host = url
        .host_str()
        .ok_or_else(|| ApiError::config(format!("endpoint has no host: {url}")))?;
    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

fn error_from_body(status: u16, body: &str) -> ApiError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(err) if !err.code.is_empty() => {
            warn!(code = %err.code, request_id = %err.request_id, "DNS API error");
            ApiError::Api {
                code: err.code,
                message: err.message,
                request_id: err.request_id,
            }
        }
        _ => ApiError::decode(format!("HTTP {status}: {body}")),
    }
}
