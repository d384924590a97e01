/// Name of the `<meta>` tag that can point the board at another API origin.
pub const API_BASE_META: &str = "activity-api-base";

/// How long a feedback message stays on screen.
pub const MESSAGE_TIMEOUT_MS: u32 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// Prefix for every service path. Empty means same origin.
    pub api_base: String,
    pub message_timeout_ms: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            message_timeout_ms: MESSAGE_TIMEOUT_MS,
        }
    }
}

impl BoardConfig {
    pub fn with_api_base(mut self, base: Option<&str>) -> Self {
        if let Some(base) = base.map(str::trim).filter(|b| !b.is_empty()) {
            self.api_base = base.trim_end_matches('/').to_string();
        }
        self
    }

    /// Reads overrides from the host page, falling back to defaults.
    pub fn from_document() -> Self {
        let base = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| {
                d.query_selector(&format!("meta[name=\"{API_BASE_META}\"]"))
                    .ok()
                    .flatten()
            })
            .and_then(|meta| meta.get_attribute("content"));
        Self::default().with_api_base(base.as_deref())
    }
}
