//! Client page state.
//!
//! A single "Call API" action drives the page through these states.
//! `CallState` is the reference model of the page: the server renders the
//! initial markup and the script's texts from it, while the transitions
//! themselves (`begin`, `settle`, `fail`) run in the browser script and are
//! exercised here only by tests.

use serde_json::Value;

/// Button text while no call is in flight.
pub const IDLE_LABEL: &str = "Call API";
/// Button text while a call is in flight.
pub const LOADING_LABEL: &str = "Calling API...";
/// Prefix of the error shown for a non-2xx proxy status.
pub const HTTP_ERROR_PREFIX: &str = "HTTP error! status: ";

/// What the page currently shows. Exactly one state at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CallState {
    #[default]
    Idle,
    Loading,
    Success(Value),
    Failed(String),
}

impl CallState {
    /// Start a call. Any previous result or error is dropped.
    pub fn begin(&mut self) {
        *self = CallState::Loading;
    }

    /// Settle a call from the proxy's status and raw body.
    pub fn settle(&mut self, status: u16, body: &str) {
        *self = if !(200..300).contains(&status) {
            CallState::Failed(format!("{HTTP_ERROR_PREFIX}{status}"))
        } else {
            match serde_json::from_str(body) {
                Ok(data) => CallState::Success(data),
                Err(e) => CallState::Failed(e.to_string()),
            }
        };
    }

    /// Settle a call that never got a response.
    pub fn fail(&mut self, message: impl Into<String>) {
        *self = CallState::Failed(message.into());
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, CallState::Loading)
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_loading() {
            LOADING_LABEL
        } else {
            IDLE_LABEL
        }
    }

    /// Markup for the result area below the button.
    pub fn render_html(&self) -> String {
        match self {
            CallState::Idle | CallState::Loading => String::new(),
            CallState::Failed(message) => format!(
                r#"<div class="error"><strong>Error:</strong> {}</div>"#,
                escape_html(message)
            ),
            CallState::Success(data) => {
                let pretty = serde_json::to_string_pretty(data).unwrap_or_default();
                format!(
                    "<div><h2>Response:</h2><pre>{}</pre></div>",
                    escape_html(&pretty)
                )
            }
        }
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter_body(count: i64) -> String {
        format!(r#"{{"message":"Hello from Rust backend 👋","count":{count}}}"#)
    }

    #[test]
    fn third_click_shows_only_latest_count() {
        let mut state = CallState::default();

        for count in 1..=3 {
            state.begin();
            assert!(state.is_loading());
            assert_eq!(state.render_html(), "");
            state.settle(200, &counter_body(count));
        }

        let html = state.render_html();
        assert!(html.contains("&quot;count&quot;: 3"));
        assert!(!html.contains("&quot;count&quot;: 1"));
        assert!(!html.contains("&quot;count&quot;: 2"));
    }

    #[test]
    fn non_ok_status_is_an_error() {
        let mut state = CallState::default();
        state.begin();
        state.settle(429, r#"{"error":"Too many requests, please try again later."}"#);
        assert_eq!(
            state,
            CallState::Failed("HTTP error! status: 429".to_string())
        );
        assert!(state.render_html().contains("HTTP error! status: 429"));
    }

    #[test]
    fn error_is_cleared_by_next_click() {
        let mut state = CallState::Failed("HTTP error! status: 500".into());
        state.begin();
        assert_eq!(state, CallState::Loading);
        state.settle(200, &counter_body(4));
        assert!(matches!(state, CallState::Success(_)));
    }

    #[test]
    fn network_failure_is_rendered_escaped() {
        let mut state = CallState::default();
        state.begin();
        state.fail("<failed to fetch>");
        assert!(state.render_html().contains("&lt;failed to fetch&gt;"));
        assert_eq!(state.button_label(), "Call API");
    }

    #[test]
    fn loading_label() {
        let mut state = CallState::default();
        state.begin();
        assert_eq!(state.button_label(), "Calling API...");
    }
}
