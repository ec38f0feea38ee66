use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // GitHub translation store
    pub github_token: String,
    pub github_repo: String,
    pub github_file: String,
    pub commit_message: String,
    pub github_api_url: String,

    // Aliyun machine translation
    pub aliyun_access_key_id: String,
    pub aliyun_access_key_secret: String,
    pub translate_api_url: String,
    pub source_language: String,
    pub target_language: String,

    // WxPusher
    pub wxpusher_app_token: String,
    pub wxpusher_uid: String,
    pub wxpusher_api_url: String,

    // Server
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // GitHub - repository holding translations.json
            github_token: std::env::var("GITHUB_TOKEN").context("GITHUB_TOKEN not set")?,
            github_repo: std::env::var("GITHUB_REPO").context("GITHUB_REPO not set")?,
            github_file: std::env::var("GITHUB_FILE")
                .unwrap_or_else(|_| "translations.json".to_string()),
            commit_message: std::env::var("COMMIT_MESSAGE")
                .unwrap_or_else(|_| "Update translations".to_string()),
            github_api_url: std::env::var("GITHUB_API_URL")
                .unwrap_or_else(|_| "https://api.github.com".to_string()),

            // Aliyun
            aliyun_access_key_id: std::env::var("ALIYUN_ACCESS_KEY_ID")
                .context("ALIYUN_ACCESS_KEY_ID not set")?,
            aliyun_access_key_secret: std::env::var("ALIYUN_ACCESS_KEY_SECRET")
                .context("ALIYUN_ACCESS_KEY_SECRET not set")?,
            translate_api_url: std::env::var("TRANSLATE_API_URL").unwrap_or_else(|_| {
                "https://mt.aliyuncs.com/api/translate/web/general".to_string()
            }),
            source_language: std::env::var("SOURCE_LANGUAGE").unwrap_or_else(|_| "en".to_string()),
            target_language: std::env::var("TARGET_LANGUAGE").unwrap_or_else(|_| "zh".to_string()),

            // WxPusher
            wxpusher_app_token: std::env::var("APP_TOKEN").context("APP_TOKEN not set")?,
            wxpusher_uid: std::env::var("UID").context("UID not set")?,
            wxpusher_api_url: std::env::var("WXPUSHER_API_URL")
                .unwrap_or_else(|_| "https://wxpusher.zjiecode.com/api/send/message".to_string()),

            // Server
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        })
    }
}
