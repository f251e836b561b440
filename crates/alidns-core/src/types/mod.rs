//! Domain and DNS record types.

mod domain;
mod record;

pub use domain::*;
pub use record::*;
