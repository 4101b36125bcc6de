//! Strict visitor-identifier validation
//!
//! Identifiers must be IP literals in one of two exact forms: a dotted quad
//! of four 1-3 digit groups, or an IPv6 literal with exactly eight
//! colon-separated hextet groups. `::` zero compression is not accepted,
//! and dotted-quad groups are not range-checked beyond their digit count;
//! both constraints are load-bearing for callers that rely on the existing
//! accept/reject behavior.

use std::sync::LazyLock;

use regex::Regex;

use crate::counting::error::CountError;

static IPV4_FORM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[0-9]{1,3}\.){3}[0-9]{1,3}$").expect("ipv4 pattern"));

static IPV6_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9a-fA-F]{1,4}:){7}(?:[0-9a-fA-F]{1,4}|:)$").expect("ipv6 pattern")
});

/// Check a candidate identifier, rejecting anything that is empty,
/// whitespace-only, or not an exact IP literal. Rejection has no side
/// effects.
pub fn validate_identifier(identifier: &str) -> Result<(), CountError> {
    if identifier.trim().is_empty() {
        return Err(CountError::InvalidIdentifier);
    }
    if IPV4_FORM.is_match(identifier) || IPV6_FORM.is_match(identifier) {
        return Ok(());
    }
    Err(CountError::InvalidIdentifier)
}
