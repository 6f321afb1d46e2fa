//! Transient notifications. Every backend failure ends up here.
//!
//! Each toast carries its own expiry time; the provider sweeps expired ones
//! from its own scope, so a toast raised right before its caller unmounts
//! still goes away on time.

use std::time::Duration;

use chrono::{DateTime, Utc};
use dioxus::prelude::*;

const TOAST_TTL_SECS: i64 = 5;
const SWEEP_EVERY: Duration = Duration::from_millis(500);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

impl Toast {
    fn new(id: u64, kind: ToastKind, message: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            kind,
            message,
            expires_at: now + chrono::Duration::seconds(TOAST_TTL_SECS),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Drop expired toasts. Returns whether anything was removed.
fn sweep(items: &mut Vec<Toast>, now: DateTime<Utc>) -> bool {
    let before = items.len();
    items.retain(|t| !t.is_expired(now));
    items.len() != before
}

/// Handle to the toast queue, provided by [`ToastProvider`].
#[derive(Clone, Copy, PartialEq)]
pub struct Toasts {
    items: Signal<Vec<Toast>>,
    next_id: Signal<u64>,
}

impl Toasts {
    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastKind::Info, message.into());
    }

    pub fn dismiss(&self, id: u64) {
        let mut items = self.items;
        items.write().retain(|t| t.id != id);
    }

    fn push(&self, kind: ToastKind, message: String) {
        let mut items = self.items;
        let mut next_id = self.next_id;
        let id = next_id();
        next_id.set(id + 1);
        items.write().push(Toast::new(id, kind, message, Utc::now()));
    }
}

#[cfg(target_arch = "wasm32")]
async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

pub fn use_toast() -> Toasts {
    use_context::<Toasts>()
}

/// Provides [`Toasts`] to its children and renders the toast stack.
#[component]
pub fn ToastProvider(children: Element) -> Element {
    let toasts = use_context_provider(|| Toasts {
        items: Signal::new(Vec::new()),
        next_id: Signal::new(0),
    });
    let mut items = toasts.items;

    use_future(move || async move {
        loop {
            sleep(SWEEP_EVERY).await;
            let now = Utc::now();
            if items.peek().iter().any(|t| t.is_expired(now)) {
                sweep(&mut items.write(), now);
            }
        }
    });

    rsx! {
        {children}
        div {
            class: "toast-stack",
            for toast in items() {
                div {
                    key: "{toast.id}",
                    class: match toast.kind {
                        ToastKind::Success => "toast toast-success",
                        ToastKind::Error => "toast toast-error",
                        ToastKind::Info => "toast toast-info",
                    },
                    span { "{toast.message}" }
                    button {
                        class: "toast-close",
                        onclick: move |_| toasts.dismiss(toast.id),
                        "×"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, secs).unwrap()
    }

    #[test]
    fn test_toast_lives_for_its_ttl() {
        let toast = Toast::new(1, ToastKind::Error, "Stand no encontrado".into(), at(0));
        assert!(!toast.is_expired(at(4)));
        assert!(toast.is_expired(at(5)));
    }

    #[test]
    fn test_sweep_drops_only_expired() {
        let mut items = vec![
            Toast::new(1, ToastKind::Error, "Sesión expirada".into(), at(0)),
            Toast::new(2, ToastKind::Success, "Pago registrado".into(), at(3)),
        ];
        assert!(sweep(&mut items, at(6)));
        assert_eq!(items.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2]);
        assert!(!sweep(&mut items, at(7)));
        assert!(sweep(&mut items, at(8)));
        assert!(items.is_empty());
    }
}
