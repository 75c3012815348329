//! 请求发送与错误映射
//!
//! 两个后端都使用 chat completions 格式，这里负责一次性发送（不重试）、
//! 状态码分类以及响应解析。

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::{AicError, Result};
use crate::llm::Completion;

/// Error preview maximum length
const ERROR_PREVIEW_LENGTH: usize = 500;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: [ChatMessage<'a>; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl<'a> ChatRequest<'a> {
    pub fn new(model: &'a str, system: &'a str, user: &'a str) -> Self {
        Self {
            model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: None,
            max_tokens: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Truncate string for error preview (safe handling of multibyte characters)
pub(crate) fn truncate_for_preview(s: &str) -> String {
    if s.len() <= ERROR_PREVIEW_LENGTH {
        return s.to_string();
    }
    let boundary = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= ERROR_PREVIEW_LENGTH)
        .last()
        .unwrap_or(0);
    format!("{}...", &s[..boundary])
}

/// 发送一次 HTTP 请求（只处理网络层错误）
async fn try_send_request<Req: Serialize>(
    client: &Client,
    endpoint: &str,
    headers: &[(&str, &str)],
    request_body: &Req,
    provider_name: &str,
) -> Result<reqwest::Response> {
    let mut req = client
        .post(endpoint)
        .header("Content-Type", "application/json");

    for (key, value) in headers {
        req = req.header(*key, *value);
    }

    tracing::debug!("Sending request to: {}", endpoint);

    req.json(request_body).send().await.map_err(|e| {
        let detail = e.to_string();
        tracing::debug!("{} API request failed: {}", provider_name, detail);

        if e.is_timeout() {
            AicError::BackendUnavailable(
                rust_i18n::t!(
                    "provider.api_request_timeout",
                    provider = provider_name,
                    detail = detail.as_str()
                )
                .to_string(),
            )
        } else if e.is_connect() {
            AicError::BackendUnavailable(
                rust_i18n::t!(
                    "provider.api_connection_failed",
                    provider = provider_name,
                    detail = detail.as_str()
                )
                .to_string(),
            )
        } else {
            AicError::Llm(format!("{} request failed: {}", provider_name, detail))
        }
    })
}

fn is_transient_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// 发送 chat completions 请求并取出第一个 choice 的内容
///
/// # Errors
/// - 超时、连接失败、429、5xx: [`AicError::BackendUnavailable`]
/// - 其他非 2xx: [`AicError::LlmApi`]
/// - 响应无法解析或没有内容: [`AicError::Llm`]
pub(crate) async fn send_chat_request<Req: Serialize>(
    client: &Client,
    endpoint: &str,
    headers: &[(&str, &str)],
    request_body: &Req,
    provider_name: &str,
) -> Result<Completion> {
    let response = try_send_request(client, endpoint, headers, request_body, provider_name).await?;

    let status = response.status();
    let body = response.text().await.map_err(|e| {
        AicError::BackendUnavailable(format!(
            "{}: failed to read response body: {}",
            provider_name, e
        ))
    })?;

    tracing::debug!("{} API response status: {}", provider_name, status);

    if is_transient_status(status) {
        return Err(AicError::BackendUnavailable(format!(
            "{} returned {}: {}",
            provider_name,
            status,
            truncate_for_preview(&body)
        )));
    }

    if !status.is_success() {
        return Err(AicError::LlmApi {
            status: status.as_u16(),
            message: format!("{}: {}", provider_name, truncate_for_preview(&body)),
        });
    }

    parse_completion(&body, provider_name)
}

/// 解析 chat completions 响应体
pub(crate) fn parse_completion(body: &str, provider_name: &str) -> Result<Completion> {
    let parse_error = |e: serde_json::Error| {
        AicError::Llm(
            rust_i18n::t!(
                "provider.parse_response_failed",
                provider = provider_name,
                error = e.to_string(),
                preview = truncate_for_preview(body).as_str()
            )
            .to_string(),
        )
    };

    let raw: serde_json::Value = serde_json::from_str(body).map_err(parse_error)?;
    let parsed: ChatResponse = serde_json::from_value(raw.clone()).map_err(parse_error)?;

    let text = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| {
            AicError::Llm(
                rust_i18n::t!("provider.empty_response", provider = provider_name).to_string(),
            )
        })?;

    Ok(Completion { text, raw })
}
