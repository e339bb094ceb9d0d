//! Blocking browser dialogs: `alert`, `confirm`, `prompt`.
//!
//! Outside `csr` these log and answer "no", so nothing destructive happens
//! without an operator.

#[cfg(test)]
#[path = "dialog_test.rs"]
mod dialog_test;

/// Show a blocking alert.
pub fn alert(message: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        tracing::info!(message, "alert");
    }
}

/// Ask a yes/no question. Usable directly as a `fleet::Confirm`.
pub fn confirm(prompt: &str) -> bool {
    #[cfg(feature = "csr")]
    {
        web_sys::window().and_then(|w| w.confirm_with_message(prompt).ok()).unwrap_or(false)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = prompt;
        false
    }
}

/// Ask for a line of text. Cancel and blank answers both yield `None`.
pub fn prompt(message: &str) -> Option<String> {
    #[cfg(feature = "csr")]
    {
        let answer = web_sys::window()?.prompt_with_message(message).ok().flatten()?;
        non_blank(&answer)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = message;
        None
    }
}

/// Trimmed answer, or `None` when blank.
pub fn non_blank(answer: &str) -> Option<String> {
    let trimmed = answer.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
