//! Transient, non-blocking notifications.

use serde::Serialize;

/// Toast style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    /// CSS class of the toast element.
    pub fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast success",
            ToastKind::Error => "toast error",
        }
    }
}

/// Identifies a shown toast so it can be dismissed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(u64);

/// A notification message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

impl Toast {
    /// Green confirmation toast.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Success,
        }
    }

    /// Red toast for a rejected action or failure.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
        }
    }
}

/// Number of past toasts kept by [`ToastTray::history`].
pub const HISTORY_LIMIT: usize = 32;

/// Toasts currently on screen, oldest first.
#[derive(Debug, Default)]
pub struct ToastTray {
    next_id: u64,
    visible: Vec<(ToastId, Toast)>,
    history: Vec<Toast>,
}

impl ToastTray {
    /// Empty tray.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a toast. The caller schedules its dismissal.
    pub fn show(&mut self, toast: Toast) -> ToastId {
        let id = ToastId(self.next_id);
        self.next_id += 1;
        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push(toast.clone());
        self.visible.push((id, toast));
        id
    }

    /// Remove a toast from the screen.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let before = self.visible.len();
        self.visible.retain(|(tid, _)| *tid != id);
        self.visible.len() < before
    }

    /// Toasts on screen.
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.visible.iter().map(|(_, t)| t)
    }

    /// The most recent toasts, oldest first, at most [`HISTORY_LIMIT`].
    pub fn history(&self) -> &[Toast] {
        &self.history
    }

    /// Most recent toast, shown or dismissed.
    pub fn last(&self) -> Option<&Toast> {
        self.history.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_and_dismiss() {
        let mut tray = ToastTray::new();
        let a = tray.show(Toast::success("Keranjang dikosongkan"));
        tray.show(Toast::error("Keranjang Anda kosong"));
        assert_eq!(tray.visible().count(), 2);

        assert!(tray.dismiss(a));
        assert!(!tray.dismiss(a));
        let left: Vec<&Toast> = tray.visible().collect();
        assert_eq!(left, vec![&Toast::error("Keranjang Anda kosong")]);
        assert_eq!(tray.history().len(), 2);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut tray = ToastTray::new();
        for i in 0..HISTORY_LIMIT + 5 {
            let id = tray.show(Toast::success(format!("toast {}", i)));
            tray.dismiss(id);
        }

        assert_eq!(tray.history().len(), HISTORY_LIMIT);
        assert_eq!(tray.history()[0], Toast::success("toast 5"));
        assert_eq!(
            tray.last(),
            Some(&Toast::success(format!("toast {}", HISTORY_LIMIT + 4)))
        );
        assert_eq!(tray.visible().count(), 0);
    }

    #[test]
    fn test_kind_class() {
        assert_eq!(ToastKind::Success.class(), "toast success");
        assert_eq!(Toast::error("x").kind.class(), "toast error");
    }
}
