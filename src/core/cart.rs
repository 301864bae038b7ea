use crate::core::curator;
use crate::domain::model::{AvailabilityStatus, CartEntry, Domain, ProbeTicket};
use std::collections::HashMap;

/// 有序、不重複的網域清單，每筆帶有自己的可用性狀態。
///
/// Status lives on the entry itself, so removing a domain always removes its
/// status with it.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    entries: Vec<CartEntry>,
    next_insertion: u64,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加到尾端，狀態設為 Unknown。已存在時回傳 `None`。
    pub fn add(&mut self, domain: Domain) -> Option<ProbeTicket> {
        if self.contains(&domain) {
            return None;
        }

        self.next_insertion += 1;
        let entry = CartEntry::new(domain, self.next_insertion);
        let ticket = entry.ticket();
        self.entries.push(entry);
        Some(ticket)
    }

    pub fn remove(&mut self, domain: &Domain) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| &entry.domain != domain);
        before != self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// 只在網域仍在購物車內時更新
    pub fn set_status(&mut self, domain: &Domain, status: AvailabilityStatus) -> bool {
        match self.entry_mut(domain) {
            Some(entry) => {
                entry.status = status;
                true
            }
            None => false,
        }
    }

    /// Applies a probe result for exactly the insertion it was issued for,
    /// and only while that insertion is still `Unknown`.
    pub fn resolve(&mut self, ticket: &ProbeTicket, status: AvailabilityStatus) -> bool {
        match self.entry_mut(&ticket.domain) {
            Some(entry)
                if entry.insertion == ticket.insertion
                    && entry.status == AvailabilityStatus::Unknown =>
            {
                entry.status = status;
                true
            }
            _ => false,
        }
    }

    /// 回傳被移除的網域
    pub fn remove_unavailable(&mut self) -> Vec<Domain> {
        let (kept, dropped) = curator::partition_available(&self.entries);
        self.entries = kept;
        dropped
    }

    /// 回傳被淘汰的網域
    pub fn keep_best(&mut self, limit: usize) -> Vec<Domain> {
        let best = curator::keep_best(&self.entries, limit);
        let evicted = self
            .entries
            .iter()
            .filter(|entry| !best.iter().any(|kept| kept.domain == entry.domain))
            .map(|entry| entry.domain.clone())
            .collect();
        self.entries = best;
        evicted
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn contains(&self, domain: &Domain) -> bool {
        self.entries.iter().any(|entry| &entry.domain == domain)
    }

    pub fn status(&self, domain: &Domain) -> Option<AvailabilityStatus> {
        self.entries
            .iter()
            .find(|entry| &entry.domain == domain)
            .map(|entry| entry.status)
    }

    pub fn availability(&self) -> HashMap<Domain, AvailabilityStatus> {
        self.entries
            .iter()
            .map(|entry| (entry.domain.clone(), entry.status))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_mut(&mut self, domain: &Domain) -> Option<&mut CartEntry> {
        self.entries.iter_mut().find(|entry| &entry.domain == domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validator::canonicalize;

    fn domain(raw: &str) -> Domain {
        canonicalize(raw).unwrap()
    }

    fn store_with(raws: &[&str]) -> CartStore {
        let mut store = CartStore::new();
        for raw in raws {
            store.add(domain(raw));
        }
        store
    }

    fn names(store: &CartStore) -> Vec<&str> {
        store.entries().iter().map(|e| e.domain.as_str()).collect()
    }

    #[test]
    fn test_add_preserves_insertion_order_with_unknown_status() {
        let store = store_with(&["b.com", "a.xyz", "c.app"]);

        assert_eq!(names(&store), vec!["b.com", "a.xyz", "c.app"]);
        assert!(store
            .entries()
            .iter()
            .all(|e| e.status == AvailabilityStatus::Unknown));
    }

    #[test]
    fn test_add_ignores_present_domain() {
        let mut store = store_with(&["a.com"]);
        assert!(store.add(domain("a.com")).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut store = store_with(&["a.com", "b.com"]);

        assert!(store.remove(&domain("a.com")));
        assert!(!store.remove(&domain("a.com")));
        assert_eq!(names(&store), vec!["b.com"]);
        assert!(!store.availability().contains_key(&domain("a.com")));
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut store = store_with(&["a.com", "b.com"]);
        store.set_status(&domain("a.com"), AvailabilityStatus::Available);
        store.clear();

        assert!(store.is_empty());
        assert!(store.availability().is_empty());
    }

    #[test]
    fn test_set_status_ignores_absent_domain() {
        let mut store = store_with(&["a.com"]);

        assert!(!store.set_status(&domain("gone.com"), AvailabilityStatus::Available));
        assert!(store.set_status(&domain("a.com"), AvailabilityStatus::Available));
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.status(&domain("a.com")),
            Some(AvailabilityStatus::Available)
        );
    }

    #[test]
    fn test_resolve_after_delete_does_not_reinsert() {
        let mut store = CartStore::new();
        let ticket = store.add(domain("d.com")).unwrap();
        store.remove(&domain("d.com"));

        assert!(!store.resolve(&ticket, AvailabilityStatus::Available));
        assert!(!store.contains(&domain("d.com")));
        assert!(store.availability().is_empty());
    }

    #[test]
    fn test_resolve_rejects_stale_ticket_after_re_add() {
        let mut store = CartStore::new();
        let stale = store.add(domain("d.com")).unwrap();
        store.remove(&domain("d.com"));
        let fresh = store.add(domain("d.com")).unwrap();

        assert!(!store.resolve(&stale, AvailabilityStatus::Unavailable));
        assert_eq!(
            store.status(&domain("d.com")),
            Some(AvailabilityStatus::Unknown)
        );
        assert!(store.resolve(&fresh, AvailabilityStatus::Available));
    }

    #[test]
    fn test_resolve_applies_only_once() {
        let mut store = CartStore::new();
        let ticket = store.add(domain("d.com")).unwrap();

        assert!(store.resolve(&ticket, AvailabilityStatus::Available));
        assert!(!store.resolve(&ticket, AvailabilityStatus::Unavailable));
        assert_eq!(
            store.status(&domain("d.com")),
            Some(AvailabilityStatus::Available)
        );
    }

    #[test]
    fn test_remove_unavailable_keeps_only_available() {
        let mut store = store_with(&["a.com", "b.xyz", "c.app"]);
        store.set_status(&domain("a.com"), AvailabilityStatus::Available);
        store.set_status(&domain("b.xyz"), AvailabilityStatus::Unavailable);

        let removed = store.remove_unavailable();

        assert_eq!(names(&store), vec!["a.com"]);
        assert_eq!(removed, vec![domain("b.xyz"), domain("c.app")]);
        assert_eq!(store.availability().len(), 1);
    }

    #[test]
    fn test_keep_best_truncates_and_keeps_status() {
        let mut store = store_with(&["zz.xyz", "a.com", "bb.app", "x.com"]);
        store.set_status(&domain("x.com"), AvailabilityStatus::Unavailable);

        let evicted = store.keep_best(2);

        assert_eq!(names(&store), vec!["a.com", "x.com"]);
        assert_eq!(evicted, vec![domain("zz.xyz"), domain("bb.app")]);
        assert_eq!(
            store.status(&domain("x.com")),
            Some(AvailabilityStatus::Unavailable)
        );
        assert!(!store.availability().contains_key(&domain("zz.xyz")));
    }
}
