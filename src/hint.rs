// ============================================
// src/hint.rs
// 覚え方のヒント (Gemini API) の取得
// ============================================

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::HintError;
use crate::kana::Category;

/// 取得に失敗したときに代わりに表示する文言
pub const HINT_FALLBACK: &str = "สู้ๆ นะ! ฝึกฝนบ่อยๆ จะจำได้เอง";

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// 文字と種類からヒント文を返すもの
#[async_trait]
pub trait HintProvider: Send + Sync {
    async fn fetch(&self, glyph: &str, category: Category) -> Result<String, HintError>;
}

/// ヒントを取得する。どんな失敗でもエラーにはせず `HINT_FALLBACK` を返す
pub async fn fetch_hint(provider: &dyn HintProvider, glyph: &str, category: Category) -> String {
    match provider.fetch(glyph, category).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Hint request for '{}' ({}) failed: {}", glyph, category, e);
            HINT_FALLBACK.to_string()
        }
    }
}

/// 問い合わせ文 (タイ語で20語以内の覚え方をお願いする)
pub fn build_prompt(glyph: &str, category: Category) -> String {
    format!(
        "Explain how to remember the Japanese {category} character \"{glyph}\" with a short, \
         creative Thai mnemonic (เคล็ดลับการจำแบบสั้นๆ). Keep it under 20 words."
    )
}

// --------------------------------------------------
// Gemini API
// --------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    thinking_config: ThinkingConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

/// レスポンスから最初の候補の本文を取り出す
fn extract_text(response: GenerateResponse) -> Result<String, HintError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .map(|c| c.content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        return Err(HintError::EmptyResponse);
    }
    Ok(text.to_string())
}

/// Gemini の `generateContent` を使うヒント取得
pub struct GeminiHints {
    http_client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiHints {
    pub fn new(api_key: Option<String>, model: impl Into<String>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client, using defaults: {}", e);
                reqwest::Client::new()
            });
        Self {
            http_client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// 接続先を差し替える (ローカルの互換サーバー向け)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl HintProvider for GeminiHints {
    async fn fetch(&self, glyph: &str, category: Category) -> Result<String, HintError> {
        let api_key = self.api_key.as_deref().ok_or(HintError::MissingApiKey)?;
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(build_prompt(glyph, category)),
                }],
            }],
            generation_config: GenerationConfig {
                thinking_config: ThinkingConfig { thinking_budget: 0 },
            },
        };

        tracing::debug!("Requesting hint for '{}' from {}", glyph, self.model);

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(HintError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        extract_text(parsed)
    }
}

/// 通信しないヒント取得 (`--offline` 用)
pub struct OfflineHints;

#[async_trait]
impl HintProvider for OfflineHints {
    async fn fetch(&self, _glyph: &str, _category: Category) -> Result<String, HintError> {
        Ok(HINT_FALLBACK.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    #[async_trait]
    impl HintProvider for Failing {
        async fn fetch(&self, _glyph: &str, _category: Category) -> Result<String, HintError> {
            Err(HintError::EmptyResponse)
        }
    }

    struct Echo;

    #[async_trait]
    impl HintProvider for Echo {
        async fn fetch(&self, glyph: &str, category: Category) -> Result<String, HintError> {
            Ok(format!("{glyph}/{category}"))
        }
    }

    #[tokio::test]
    async fn failure_becomes_fallback_text() {
        assert_eq!(fetch_hint(&Failing, "あ", Category::Hiragana).await, HINT_FALLBACK);
    }

    #[tokio::test]
    async fn success_is_passed_through() {
        assert_eq!(fetch_hint(&Echo, "ア", Category::Katakana).await, "ア/katakana");
    }

    #[tokio::test]
    async fn missing_api_key_falls_back_without_a_request() {
        let hints = GeminiHints::new(Some("  ".into()), DEFAULT_MODEL, Duration::from_secs(1));
        assert!(matches!(
            hints.fetch("あ", Category::Hiragana).await,
            Err(HintError::MissingApiKey)
        ));
        assert_eq!(fetch_hint(&hints, "あ", Category::Hiragana).await, HINT_FALLBACK);
    }

    #[tokio::test]
    async fn unreachable_server_falls_back() {
        let hints = GeminiHints::new(Some("key".into()), DEFAULT_MODEL, Duration::from_secs(2))
            .with_base_url("http://127.0.0.1:9");
        assert_eq!(fetch_hint(&hints, "か", Category::Hiragana).await, HINT_FALLBACK);
    }

    #[test]
    fn prompt_names_the_character_and_category() {
        let prompt = build_prompt("ツ", Category::Katakana);
        assert!(prompt.contains("katakana character \"ツ\""));
        assert!(prompt.contains("under 20 words"));
    }

    #[test]
    fn request_uses_gemini_field_names() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some("hi".into()),
                }],
            }],
            generation_config: GenerationConfig {
                thinking_config: ThinkingConfig { thinking_budget: 0 },
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(json["generationConfig"]["thinkingConfig"]["thinkingBudget"], 0);
    }

    #[test]
    fn response_text_is_extracted_and_trimmed() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":" จำว่า "},{"text":"อะ\n"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "จำว่า อะ");
    }

    #[test]
    fn empty_response_is_an_error() {
        for body in [
            r#"{}"#,
            r#"{"candidates":[]}"#,
            r#"{"candidates":[{"content":{"parts":[]}}]}"#,
        ] {
            let response: GenerateResponse = serde_json::from_str(body).unwrap();
            assert!(matches!(extract_text(response), Err(HintError::EmptyResponse)));
        }
    }
}
