//! MyMemory translation API client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::TranslationConfig;
use crate::error::{SubifyError, TranslateError};
use crate::language::LanguageCode;

use super::Translator;

/// Subset of the MyMemory `get` response we read.
#[derive(Debug, Deserialize)]
struct MyMemoryResponse {
    #[serde(rename = "responseData")]
    response_data: ResponseData,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Client for `https://api.mymemory.translated.net/get`.
#[derive(Debug, Clone)]
pub struct MyMemoryClient {
    client: Client,
    endpoint: String,
    source: String,
}

impl MyMemoryClient {
    pub fn new(config: &TranslationConfig) -> Result<Self, SubifyError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("subify/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SubifyError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            source: config.source_language.clone(),
        })
    }

    /// The `source|target` pair sent as `langpair`.
    pub fn lang_pair(&self, target: &LanguageCode) -> String {
        format!("{}|{}", self.source, target)
    }
}

#[async_trait]
impl Translator for MyMemoryClient {
    async fn translate(&self, text: &str, target: &LanguageCode) -> Result<String, TranslateError> {
        let lang_pair = self.lang_pair(target);
        tracing::debug!(langpair = %lang_pair, "Requesting translation");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", text), ("langpair", lang_pair.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let parsed: MyMemoryResponse = serde_json::from_slice(&body)?;
        Ok(parsed.response_data.translated_text)
    }
}
