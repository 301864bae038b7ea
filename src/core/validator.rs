use crate::core::cart::CartStore;
use crate::domain::model::{Domain, Suffix};
use crate::utils::error::{CartError, Result};
use regex::Regex;
use std::sync::LazyLock;

// 標籤 1-63 字元，首尾不可為連字號；後綴 2-6 個字母
static DOMAIN_GRAMMAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.[a-z]{2,6}$")
        .expect("domain grammar is a valid regex")
});

/// Trim + 小寫，然後檢查文法與後綴白名單。不檢查重複。
pub fn canonicalize(raw: &str) -> Result<Domain> {
    let canonical = raw.trim().to_lowercase();

    if !DOMAIN_GRAMMAR.is_match(&canonical) {
        tracing::debug!("Rejected '{}': grammar mismatch", raw);
        return Err(CartError::InvalidFormat {
            input: raw.to_string(),
        });
    }

    let domain = Domain::new_unchecked(canonical);
    if domain.suffix().is_none() {
        tracing::debug!(
            "Rejected '{}': suffix .{} not in allow-list ({})",
            raw,
            domain.suffix_label(),
            Suffix::ALL.map(Suffix::label).join(", ")
        );
        return Err(CartError::InvalidFormat {
            input: raw.to_string(),
        });
    }

    Ok(domain)
}

/// Pure check of a raw string against the grammar and the current cart.
pub fn validate(raw: &str, cart: &CartStore) -> Result<Domain> {
    let domain = canonicalize(raw)?;
    if cart.contains(&domain) {
        return Err(CartError::Duplicate {
            domain: domain.to_string(),
        });
    }
    Ok(domain)
}
