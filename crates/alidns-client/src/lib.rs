//! Alibaba Cloud DNS OpenAPI client.
//!
//! Covers the domain and record actions AliDNS Manager needs:
//! `DescribeDomains`, `DescribeDomainRecords`, `AddDomainRecord`,
//! `UpdateDomainRecord`, `DeleteDomainRecord` and `SetDomainRecordStatus`.
//! Requests are signed with ACS3-HMAC-SHA256.
//!
//! # Example
//!
//! ```rust,ignore
//! use alidns_client::{AliDnsClient, DnsApi};
//! use alidns_core::{SecretString, Settings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::load_or_default()?;
//!     let secret = SecretString::new("your-access-key-secret");
//!     let client = AliDnsClient::from_settings("LTAI...", &secret, &settings)?;
//!
//!     for domain in client.list_domains().await? {
//!         println!("{}", domain);
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod error;
pub mod signing;
mod wire;

pub use client::{AliDnsClient, DnsApi, API_VERSION, PAGE_SIZE};
pub use error::{ApiError, Result};
