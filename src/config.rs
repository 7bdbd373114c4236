//! API Configuration

/// Where the CRM API lives. Defaults to `<page origin>/api`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Derive the base URL from the current page origin.
    pub fn from_window() -> Self {
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default();
        Self::new(format!("{}/api", origin))
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let cfg = ApiConfig::new("https://crm.example/api/");
        assert_eq!(cfg.endpoint("/leads"), "https://crm.example/api/leads");
        assert_eq!(cfg.endpoint("stages"), "https://crm.example/api/stages");
    }
}
