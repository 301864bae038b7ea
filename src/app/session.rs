use crate::app::commands::{Command, HELP_TEXT};
use crate::core::manager::{CartEvent, CartManager};
use crate::core::{AvailabilityProber, CartEntry, CartSummary};
use crate::utils::error::{CartError, Result};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    Quit,
}

#[derive(Serialize)]
struct CartSnapshot<'a> {
    domains: &'a [CartEntry],
    summary: CartSummary,
    can_purchase: bool,
}

/// 文字介面：一行一個指令，輸出回傳給呼叫端顯示
pub struct Session<P: AvailabilityProber + 'static> {
    manager: CartManager<P>,
}

impl<P: AvailabilityProber + 'static> Session<P> {
    pub fn new(manager: CartManager<P>) -> Self {
        Self { manager }
    }

    pub fn manager(&self) -> &CartManager<P> {
        &self.manager
    }

    /// Parses and runs one input line. Cart errors are rendered into the
    /// output; they never end the session.
    pub async fn handle_line(&self, line: &str) -> Reply {
        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Reply::Output(String::new()),
            Err(e) => return Reply::Output(render_error(&e)),
        };

        if command == Command::Quit {
            return Reply::Quit;
        }

        match self.execute(command).await {
            Ok(output) => Reply::Output(output),
            Err(e) if e.is_recoverable() => {
                tracing::debug!("Command failed: {}", e);
                Reply::Output(render_error(&e))
            }
            Err(e) => {
                tracing::error!("❌ Command failed: {}", e);
                tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                Reply::Output(render_error(&e))
            }
        }
    }

    pub async fn execute(&self, command: Command) -> Result<String> {
        match command {
            Command::Add(raws) => Ok(self.add_all(&raws).await),
            Command::Delete(raw) => {
                if self.manager.remove(&raw).await {
                    Ok(format!("🗑️  Removed {}", raw.trim().to_lowercase()))
                } else {
                    Ok(format!("{} is not in the cart", raw))
                }
            }
            Command::Clear => {
                self.manager.clear().await;
                Ok("Cart cleared".to_string())
            }
            Command::Prune => {
                let removed = self.manager.remove_unavailable().await;
                Ok(format!(
                    "Removed {} domain(s) that are not available\n{}",
                    removed.len(),
                    self.manager.summary().await
                ))
            }
            Command::Best => {
                let evicted = self.manager.keep_best_required().await;
                Ok(format!(
                    "Kept the best {} domain(s), evicted {}\n{}",
                    self.manager.required(),
                    evicted.len(),
                    self.render_list().await
                ))
            }
            Command::Copy => {
                let text = self.manager.copy_text().await;
                if text.is_empty() {
                    Ok("Cart is empty, nothing to copy".to_string())
                } else {
                    Ok(text)
                }
            }
            Command::List => Ok(self.render_list().await),
            Command::Json => {
                let entries = self.manager.snapshot().await;
                let summary = self.manager.summary().await;
                let snapshot = CartSnapshot {
                    domains: &entries,
                    summary,
                    can_purchase: summary.can_finalize(),
                };
                Ok(serde_json::to_string_pretty(&snapshot)?)
            }
            Command::Status => Ok(self.manager.summary().await.to_string()),
            Command::Purchase => {
                let summary = self.manager.purchase().await?;
                Ok(format!(
                    "🛒 {} domains ready. Registration is not connected, nothing was bought.",
                    summary.total
                ))
            }
            Command::Help => Ok(HELP_TEXT.to_string()),
            Command::Quit => Ok(String::new()),
        }
    }

    async fn add_all(&self, raws: &[String]) -> String {
        let mut lines = Vec::with_capacity(raws.len());
        for raw in raws {
            match self.manager.add(raw).await {
                // 檢查在背景進行，結果以事件回報
                Ok(pending) => lines.push(format!("➕ {} (Checking...)", pending.domain())),
                Err(e) => lines.push(render_error(&e)),
            }
        }
        lines.join("\n")
    }

    async fn render_list(&self) -> String {
        let entries = self.manager.snapshot().await;
        let summary = self.manager.summary().await;
        if entries.is_empty() {
            return format!("Cart is empty\n{}", summary);
        }

        let width = entries
            .iter()
            .map(|entry| entry.domain.len())
            .max()
            .unwrap_or_default();
        let mut lines: Vec<String> = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                format!(
                    "{:>3}. {:<width$}  {}",
                    i + 1,
                    entry.domain.as_str(),
                    entry.status,
                    width = width
                )
            })
            .collect();
        lines.push(summary.to_string());
        lines.join("\n")
    }
}

pub fn render_error(e: &CartError) -> String {
    format!("❌ {}", e.user_friendly_message())
}

/// 只有非同步的可用性結果需要額外顯示，其他事件已由指令輸出涵蓋
pub fn render_event(event: &CartEvent) -> Option<String> {
    match event {
        CartEvent::StatusResolved { domain, status } => Some(format!("🔎 {}: {}", domain, status)),
        CartEvent::ProbeFailed { domain, message } => Some(format!(
            "⚠️  Failed to check availability of {}, marked Unavailable ({})",
            domain, message
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AvailabilityStatus, Domain};
    use async_trait::async_trait;

    /// 只有 .com 可用
    struct ComOnlyProber;

    #[async_trait]
    impl AvailabilityProber for ComOnlyProber {
        async fn probe(&self, domain: &Domain) -> Result<bool> {
            Ok(domain.suffix_label() == "com")
        }
    }

    fn session(required: usize) -> Session<ComOnlyProber> {
        Session::new(CartManager::new(ComOnlyProber, required))
    }

    async fn output(session: &Session<ComOnlyProber>, line: &str) -> String {
        match session.handle_line(line).await {
            Reply::Output(text) => text,
            Reply::Quit => panic!("unexpected quit for '{}'", line),
        }
    }

    /// 讓背景的 probe 任務執行完
    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_add_reports_each_domain() {
        let session = session(5);

        let text = output(&session, "add a.com bad-.com a.com").await;
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "➕ a.com (Checking...)");
        assert!(lines[1].starts_with("❌ Enter a valid domain"));
        assert_eq!(lines[2], "❌ a.com is already added.");
    }

    #[tokio::test]
    async fn test_list_shows_status_and_summary() {
        let session = session(2);
        output(&session, "add a.com b.xyz").await;
        settle().await;

        let text = output(&session, "list").await;

        assert!(text.contains("1. a.com  Available"));
        assert!(text.contains("2. b.xyz  Unavailable"));
        assert!(text.ends_with("1 of 2 domains added (Need more)"));
    }

    #[tokio::test]
    async fn test_prune_then_copy() {
        let session = session(5);
        output(&session, "add zz.com b.xyz a.com").await;
        settle().await;

        output(&session, "prune").await;

        assert_eq!(output(&session, "copy").await, "zz.com, a.com");
    }

    #[tokio::test]
    async fn test_best_keeps_required_count() {
        let session = session(2);
        output(&session, "add zz.xyz a.com bb.app x.com").await;

        let text = output(&session, "best").await;

        assert!(text.starts_with("Kept the best 2 domain(s), evicted 2"));
        assert_eq!(output(&session, "copy").await, "a.com, x.com");
    }

    #[tokio::test]
    async fn test_purchase_requires_complete_cart() {
        let session = session(1);

        let refused = output(&session, "purchase").await;
        assert!(refused.starts_with("❌ Purchase needs exactly 1"));

        output(&session, "add ok.com").await;
        settle().await;
        let accepted = output(&session, "purchase").await;
        assert!(accepted.starts_with("🛒 1 domains ready"));
    }

    #[tokio::test]
    async fn test_json_snapshot() {
        let session = session(1);
        output(&session, "add ok.com").await;
        settle().await;

        let text = output(&session, "json").await;
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["domains"][0]["domain"], "ok.com");
        assert_eq!(value["domains"][0]["status"], "available");
        assert_eq!(value["summary"]["available"], 1);
        assert_eq!(value["can_purchase"], true);
    }

    #[tokio::test]
    async fn test_delete_and_clear() {
        let session = session(5);
        output(&session, "add a.com b.com").await;

        assert_eq!(output(&session, "rm A.com").await, "🗑️  Removed a.com");
        assert_eq!(output(&session, "rm a.com").await, "a.com is not in the cart");

        output(&session, "clear").await;
        assert_eq!(output(&session, "copy").await, "Cart is empty, nothing to copy");
    }

    #[tokio::test]
    async fn test_quit_and_unknown_commands() {
        let session = session(5);

        assert_eq!(session.handle_line("quit").await, Reply::Quit);
        assert!(output(&session, "frobnicate").await.starts_with("❌ Unknown command"));
        assert_eq!(output(&session, "").await, "");
    }

    #[test]
    fn test_render_event_only_for_probe_results() {
        let domain = crate::core::validator::canonicalize("a.com").unwrap();

        assert_eq!(
            render_event(&CartEvent::StatusResolved {
                domain: domain.clone(),
                status: AvailabilityStatus::Available
            }),
            Some("🔎 a.com: Available".to_string())
        );
        assert!(render_event(&CartEvent::ProbeFailed {
            domain: domain.clone(),
            message: "timeout".to_string()
        })
        .unwrap()
        .contains("marked Unavailable"));
        assert_eq!(render_event(&CartEvent::Added { domain }), None);
        assert_eq!(render_event(&CartEvent::Cleared), None);
    }
}
