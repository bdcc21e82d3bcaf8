use crate::ports::Notifier;

/// `window.alert` and `window.confirm`
pub struct BrowserDialogs;

impl Notifier for BrowserDialogs {
    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}
