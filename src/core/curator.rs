//! Bulk cart operations as pure functions over cart entries.
//!
//! Each function returns new data instead of mutating; [`CartStore`] swaps the
//! result in.
//!
//! [`CartStore`]: crate::core::cart::CartStore

use crate::domain::model::{CartEntry, CartSummary, Domain, Suffix};

/// 將未知後綴排在所有已知後綴之後
fn suffix_rank(domain: &Domain) -> usize {
    domain.suffix().map(Suffix::rank).unwrap_or(usize::MAX)
}

/// 分成 (狀態為 Available 的項目, 其餘被移除的網域)
pub fn partition_available(entries: &[CartEntry]) -> (Vec<CartEntry>, Vec<Domain>) {
    let (kept, dropped): (Vec<_>, Vec<_>) =
        entries.iter().cloned().partition(CartEntry::is_available);
    let dropped = dropped.into_iter().map(|entry| entry.domain).collect();
    (kept, dropped)
}

/// Stable sort by (suffix rank, length), then truncate to `limit`.
pub fn keep_best(entries: &[CartEntry], limit: usize) -> Vec<CartEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by_key(|entry| (suffix_rank(&entry.domain), entry.domain.len()));
    sorted.truncate(limit);
    sorted
}

pub fn count<F>(entries: &[CartEntry], predicate: F) -> usize
where
    F: Fn(&CartEntry) -> bool,
{
    entries.iter().filter(|entry| predicate(entry)).count()
}

pub fn available_count(entries: &[CartEntry]) -> usize {
    count(entries, CartEntry::is_available)
}

pub fn summary(entries: &[CartEntry], required: usize) -> CartSummary {
    CartSummary {
        available: available_count(entries),
        total: entries.len(),
        required,
    }
}

pub fn can_finalize(entries: &[CartEntry], required: usize) -> bool {
    summary(entries, required).can_finalize()
}

/// 複製到剪貼簿用的文字
pub fn copy_text(entries: &[CartEntry]) -> String {
    entries
        .iter()
        .map(|entry| entry.domain.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
