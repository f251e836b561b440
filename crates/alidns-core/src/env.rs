//! Environment variable handling.

use std::env;

/// Get an environment variable, returning None if not set or empty.
pub fn get_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Get the first non-empty variable among `names`.
pub fn first_var(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| get_var(name))
}

/// Get an environment variable as a u64 (e.g., for timeouts).
pub fn get_u64(name: &str) -> Option<u64> {
    get_var(name).and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_var_is_none() {
        assert!(get_var("ALIDNS_TEST_SURELY_UNSET_VAR").is_none());
        assert!(get_u64("ALIDNS_TEST_SURELY_UNSET_VAR").is_none());
    }

    #[test]
    fn test_first_var_skips_unset() {
        // PATH is set in every test environment we run in.
        let found = first_var(&["ALIDNS_TEST_SURELY_UNSET_VAR", "PATH"]);
        assert!(found.is_some());
    }
}
