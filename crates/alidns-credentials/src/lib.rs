//! Encrypted local storage for the AccessKey pair.
//!
//! The AccessKey Secret is sealed with AES-256-GCM under a key bound to the
//! current OS user and machine before it is written next to the plain
//! AccessKey ID. Saving reports failures; loading and clearing never do.

pub mod crypto;
pub mod error;
pub mod keychain;
pub mod scope;
pub mod store;
pub mod types;

pub use error::{CredentialError, Result};
pub use scope::UserScope;
pub use store::{CredentialStore, FileCredentialStore};
pub use types::{CredentialRecord, LoadOutcome, StoreState};
