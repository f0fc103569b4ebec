use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub retell_api_key: String,
    pub retell_base_url: String,
    pub retell_start_call_path: String,
    pub retell_reply_path: String,
    pub retell_from_number: String,
    pub webhook_base_url: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            retell_api_key: env::var("RETELL_API_KEY").unwrap_or_default(),
            retell_base_url: env::var("RETELL_BASE_URL")
                .unwrap_or_else(|_| "https://api.retellai.com".to_string()),
            retell_start_call_path: env::var("RETELL_START_CALL_PATH")
                .unwrap_or_else(|_| "/v2/create-phone-call".to_string()),
            retell_reply_path: env::var("RETELL_REPLY_PATH")
                .unwrap_or_else(|_| "/v2/calls/reply".to_string()),
            retell_from_number: env::var("RETELL_FROM_NUMBER").unwrap_or_default(),
            webhook_base_url: env::var("WEBHOOK_BASE_URL")
                .unwrap_or_else(|_| "https://your-domain.com".to_string()),
            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            gemini_api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
        }
    }

    pub fn start_call_url(&self) -> String {
        join_url(&self.retell_base_url, &self.retell_start_call_path)
    }

    pub fn reply_url(&self) -> String {
        join_url(&self.retell_base_url, &self.retell_reply_path)
    }

    pub fn webhook_url(&self) -> String {
        join_url(&self.webhook_base_url, "/webhook")
    }

    pub fn from_number(&self) -> Option<String> {
        Some(self.retell_from_number.clone()).filter(|n| !n.is_empty())
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_handles_slashes() {
        let expected = "https://api.retellai.com/v2/calls";
        assert_eq!(join_url("https://api.retellai.com/", "/v2/calls"), expected);
        assert_eq!(join_url("https://api.retellai.com", "v2/calls"), expected);
    }
}
