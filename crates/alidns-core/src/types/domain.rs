//! Hosted domain summary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A domain hosted on the DNS service, as listed by `DescribeDomains`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainInfo {
    /// Fully qualified domain name, e.g. `example.com`.
    pub domain_name: String,

    /// Provider-side identifier.
    pub domain_id: String,

    /// Number of records under the domain.
    pub record_count: u64,

    /// Creation time as reported by the provider.
    pub create_time: String,
}

impl fmt::Display for DomainInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.domain_name)
    }
}
