use crate::core::cart::CartStore;
use crate::core::{curator, validator};
use crate::domain::model::{AvailabilityStatus, CartEntry, CartSummary, Domain, ProbeTicket};
use crate::domain::ports::{AvailabilityProber, ConfigProvider};
use crate::utils::error::{CartError, Result};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;

pub const DEFAULT_REQUIRED_DOMAINS: usize = 5;
/// 單一訂閱者可落後的事件數；每個網域最多產生兩筆（加入、檢查結果）
const EVENT_CAPACITY: usize = 1024;

/// 購物車變動通知，前端透過 [`CartManager::subscribe`] 取得
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    Added { domain: Domain },
    Removed { domain: Domain },
    Cleared,
    Pruned { removed: Vec<Domain> },
    Trimmed { removed: Vec<Domain> },
    StatusResolved { domain: Domain, status: AvailabilityStatus },
    ProbeFailed { domain: Domain, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Resolved {
        domain: Domain,
        status: AvailabilityStatus,
    },
    /// 檢查失敗，狀態已強制設為 Unavailable
    Failed { domain: Domain, message: String },
    /// 網域在結果回來前已被移除（或重新加入），結果被丟棄
    Discarded { domain: Domain },
}

/// Handle to the availability check spawned by [`CartManager::add`].
#[derive(Debug)]
pub struct PendingProbe {
    domain: Domain,
    handle: JoinHandle<ProbeOutcome>,
}

impl PendingProbe {
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub async fn outcome(self) -> ProbeOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Probe task for {} did not complete: {}", self.domain, e);
                ProbeOutcome::Discarded {
                    domain: self.domain,
                }
            }
        }
    }
}

/// 購物車的唯一擁有者：所有修改都經過同一把鎖。
pub struct CartManager<P: AvailabilityProber + 'static> {
    store: Arc<Mutex<CartStore>>,
    prober: Arc<P>,
    required: usize,
    events: broadcast::Sender<CartEvent>,
}

impl<P: AvailabilityProber + 'static> CartManager<P> {
    pub fn new(prober: P, required: usize) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            store: Arc::new(Mutex::new(CartStore::new())),
            prober: Arc::new(prober),
            required,
            events,
        }
    }

    pub fn from_config<C: ConfigProvider>(prober: P, config: &C) -> Self {
        Self::new(prober, config.required_domains())
    }

    pub fn required(&self) -> usize {
        self.required
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events.subscribe()
    }

    /// Validates `raw`, inserts it with `Unknown` status and starts its
    /// availability check in the background.
    pub async fn add(&self, raw: &str) -> Result<PendingProbe> {
        let ticket = {
            let mut store = self.store.lock().await;
            let domain = validator::validate(raw, &store)?;
            let ticket = store.add(domain.clone()).ok_or(CartError::Duplicate {
                domain: domain.to_string(),
            })?;
            emit(&self.events, CartEvent::Added { domain });
            ticket
        };

        tracing::info!("➕ Added {}, checking availability", ticket.domain);

        let domain = ticket.domain.clone();
        let handle = tokio::spawn(run_probe(
            Arc::clone(&self.store),
            Arc::clone(&self.prober),
            self.events.clone(),
            ticket,
        ));

        Ok(PendingProbe { domain, handle })
    }

    /// 輸入無法正規化或不在購物車內時不做任何事
    pub async fn remove(&self, raw: &str) -> bool {
        let Ok(domain) = validator::canonicalize(raw) else {
            return false;
        };

        let mut store = self.store.lock().await;
        let removed = store.remove(&domain);
        if removed {
            tracing::debug!("Removed {}", domain);
            emit(&self.events, CartEvent::Removed { domain });
        }
        removed
    }

    pub async fn clear(&self) {
        let mut store = self.store.lock().await;
        store.clear();
        tracing::debug!("Cart cleared");
        emit(&self.events, CartEvent::Cleared);
    }

    pub async fn remove_unavailable(&self) -> Vec<Domain> {
        let mut store = self.store.lock().await;
        let removed = store.remove_unavailable();
        tracing::info!("🧹 Removed {} domains that are not available", removed.len());
        emit(
            &self.events,
            CartEvent::Pruned {
                removed: removed.clone(),
            },
        );
        removed
    }

    pub async fn keep_best(&self, limit: usize) -> Vec<Domain> {
        let mut store = self.store.lock().await;
        let evicted = store.keep_best(limit);
        tracing::info!(
            "⭐ Kept the best {} domains, evicted {}",
            limit,
            evicted.len()
        );
        emit(
            &self.events,
            CartEvent::Trimmed {
                removed: evicted.clone(),
            },
        );
        evicted
    }

    pub async fn keep_best_required(&self) -> Vec<Domain> {
        self.keep_best(self.required).await
    }

    pub async fn status(&self, raw: &str) -> Option<AvailabilityStatus> {
        let domain = validator::canonicalize(raw).ok()?;
        self.store.lock().await.status(&domain)
    }

    pub async fn snapshot(&self) -> Vec<CartEntry> {
        self.store.lock().await.entries().to_vec()
    }

    pub async fn total_count(&self) -> usize {
        self.store.lock().await.len()
    }

    pub async fn available_count(&self) -> usize {
        curator::available_count(self.store.lock().await.entries())
    }

    pub async fn summary(&self) -> CartSummary {
        curator::summary(self.store.lock().await.entries(), self.required)
    }

    pub async fn can_finalize(&self) -> bool {
        curator::can_finalize(self.store.lock().await.entries(), self.required)
    }

    pub async fn copy_text(&self) -> String {
        curator::copy_text(self.store.lock().await.entries())
    }

    /// 沒有實際的註冊流程，只檢查是否允許購買
    pub async fn purchase(&self) -> Result<CartSummary> {
        let summary = self.summary().await;
        if !summary.can_finalize() {
            return Err(CartError::PurchaseUnavailable {
                available: summary.available,
                total: summary.total,
                required: summary.required,
            });
        }

        tracing::info!(
            "🛒 Purchase requested for {} domains; no registration flow is connected",
            summary.total
        );
        Ok(summary)
    }
}

/// 呼叫端必須持有 store 的鎖，事件順序才會與購物車的修改順序一致
fn emit(events: &broadcast::Sender<CartEvent>, event: CartEvent) {
    // 沒有訂閱者時 send 會失敗，可忽略
    let _ = events.send(event);
}

async fn run_probe<P: AvailabilityProber>(
    store: Arc<Mutex<CartStore>>,
    prober: Arc<P>,
    events: broadcast::Sender<CartEvent>,
    ticket: ProbeTicket,
) -> ProbeOutcome {
    let (status, failure) = match prober.probe(&ticket.domain).await {
        Ok(available) => (AvailabilityStatus::from_available(available), None),
        Err(e) => {
            tracing::warn!("⚠️ Availability check failed for {}: {}", ticket.domain, e);
            (AvailabilityStatus::Unavailable, Some(e.to_string()))
        }
    };

    // 事件送出前不釋放鎖，訂閱者不會在 Removed 之後看到同一網域的結果
    let mut guard = store.lock().await;
    let applied = guard.resolve(&ticket, status);
    let domain = ticket.domain;
    if !applied {
        tracing::debug!("Discarding late availability result for {}", domain);
        return ProbeOutcome::Discarded { domain };
    }

    match failure {
        Some(message) => {
            emit(
                &events,
                CartEvent::ProbeFailed {
                    domain: domain.clone(),
                    message: message.clone(),
                },
            );
            ProbeOutcome::Failed { domain, message }
        }
        None => {
            tracing::debug!("{} is {}", domain, status);
            emit(
                &events,
                CartEvent::StatusResolved {
                    domain: domain.clone(),
                    status,
                },
            );
            ProbeOutcome::Resolved { domain, status }
        }
    }
}
