//! Zhipu chat model: request building, non-stream generation and streaming

use serde_json::json;
use tracing::debug;

use super::convert::convert_messages;
use super::provider::ZhipuConfig;
use super::settings::{ZhipuChatSettings, is_reasoning_model, is_vision_model};
use super::streaming::ZhipuEventConverter;
use super::tools::prepare_tools;
use super::types::ZhipuChatResponse;
use super::utils::{map_error_body, map_finish_reason, response_metadata};
use crate::error::LlmError;
use crate::streaming::{ChatStreamResponse, StreamFactory};
use crate::types::{
    ChatRequest, ChatResponse, ContentPart, ResponseFormat, TokenUsage, ToolCall, Warning,
};

/// Chat model bound to one model ID
#[derive(Debug, Clone)]
pub struct ZhipuChatModel {
    model_id: String,
    settings: ZhipuChatSettings,
    config: ZhipuConfig,
}

impl ZhipuChatModel {
    pub(crate) fn new(model_id: String, settings: ZhipuChatSettings, config: ZhipuConfig) -> Self {
        Self {
            model_id,
            settings,
            config,
        }
    }

    /// The model this handle generates with
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Builds the request body plus warnings about dropped settings.
    ///
    /// Vision models reject `stop` and structured output; reasoning models
    /// reject structured output. Those settings are dropped with a warning
    /// rather than failing the call.
    fn build_args(
        &self,
        request: &ChatRequest,
        stream: bool,
    ) -> Result<(serde_json::Value, Vec<Warning>), LlmError> {
        let mut warnings = Vec::new();
        let params = &request.params;

        if params.top_k.is_some() {
            warnings.push(Warning::unsupported_setting("top_k", None::<String>));
        }
        if params.frequency_penalty.is_some() {
            warnings.push(Warning::unsupported_setting(
                "frequency_penalty",
                None::<String>,
            ));
        }
        if params.presence_penalty.is_some() {
            warnings.push(Warning::unsupported_setting(
                "presence_penalty",
                None::<String>,
            ));
        }
        if params.seed.is_some() {
            warnings.push(Warning::unsupported_setting("seed", None::<String>));
        }

        let vision = is_vision_model(&self.model_id);
        let reasoning = is_reasoning_model(&self.model_id);

        let mut stop = params
            .stop_sequences
            .as_ref()
            .and_then(|s| s.first().cloned());
        if params
            .stop_sequences
            .as_ref()
            .is_some_and(|s| s.len() > 1)
        {
            warnings.push(Warning::unsupported_setting(
                "stop_sequences",
                Some("only the first stop sequence is sent"),
            ));
        }
        if stop.is_some() && vision {
            stop = None;
            warnings.push(Warning::unsupported_setting(
                "stop_sequences",
                Some("vision models do not support stop sequences"),
            ));
        }

        let mut response_format = None;
        match &params.response_format {
            Some(ResponseFormat::Json { schema }) => {
                if vision || reasoning {
                    warnings.push(Warning::unsupported_setting(
                        "response_format",
                        Some("JSON response format is not available for this model"),
                    ));
                } else {
                    if schema.is_some() {
                        warnings.push(Warning::unsupported_setting(
                            "response_format.schema",
                            Some("JSON response format schema is not supported"),
                        ));
                    }
                    response_format = Some(json!({ "type": "json_object" }));
                }
            }
            Some(ResponseFormat::Text) | None => {}
        }

        if !vision {
            let has_media = request.messages.iter().any(|m| {
                m.content
                    .iter()
                    .any(|p| matches!(p, ContentPart::File { .. }))
            });
            if has_media {
                warnings.push(Warning::other(
                    "non-vision models do not support file message parts",
                ));
            }
        }

        let messages = convert_messages(&request.messages)?;
        let prepared = prepare_tools(request.tools.as_deref(), request.tool_choice.as_ref());
        warnings.extend(prepared.warnings);

        let mut body = json!({
            "model": self.model_id,
            "messages": messages,
        });

        let obj = body
            .as_object_mut()
            .ok_or_else(|| LlmError::InternalError("request body is not an object".to_string()))?;

        if let Some(user_id) = &self.settings.user_id {
            obj.insert("user_id".to_string(), json!(user_id));
        }
        if let Some(request_id) = &self.settings.request_id {
            obj.insert("request_id".to_string(), json!(request_id));
        }
        if let Some(do_sample) = self.settings.do_sample {
            obj.insert("do_sample".to_string(), json!(do_sample));
        }
        if let Some(thinking) = &self.settings.thinking {
            obj.insert("thinking".to_string(), serde_json::to_value(thinking)?);
        }
        if let Some(max_tokens) = params.max_tokens {
            obj.insert("max_tokens".to_string(), json!(max_tokens));
        }
        if let Some(temperature) = params.temperature {
            obj.insert("temperature".to_string(), json!(temperature));
        }
        if let Some(top_p) = params.top_p {
            obj.insert("top_p".to_string(), json!(top_p));
        }
        if let Some(stop) = stop {
            obj.insert("stop".to_string(), json!([stop]));
        }
        if let Some(format) = response_format {
            obj.insert("response_format".to_string(), format);
        }
        if let Some(tools) = prepared.tools {
            obj.insert("tools".to_string(), json!(tools));
        }
        if let Some(choice) = prepared.tool_choice {
            obj.insert("tool_choice".to_string(), json!(choice));
        }
        if stream {
            obj.insert("stream".to_string(), json!(true));
        }

        Ok((body, warnings))
    }

    /// Non-streaming generation
    pub async fn generate(&self, request: ChatRequest) -> Result<ChatResponse, LlmError> {
        let (body, warnings) = self.build_args(&request, false)?;
        let request_body = serde_json::to_string(&body)?;

        debug!(model = %self.model_id, "sending chat completion request");

        let response = self
            .config
            .http_client
            .post(self.config.url("/chat/completions"))
            .headers(self.config.headers()?)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(map_error_body(status.as_u16(), &text));
        }

        let parsed: ZhipuChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::ParseError(format!("invalid chat response: {e}")))?;

        let metadata = response_metadata(parsed.id, parsed.model, parsed.created);
        let usage = parsed.usage.map_or_else(TokenUsage::unknown, |u| {
            TokenUsage::new(
                u.prompt_tokens.map_or(f64::NAN, |t| t as f64),
                u.completion_tokens.map_or(f64::NAN, |t| t as f64),
            )
        });

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::ParseError("response contained no choices".to_string()))?;

        let text = choice.message.content.filter(|t| !t.is_empty());
        let tool_calls = choice.message.tool_calls.map(|calls| {
            calls
                .into_iter()
                .map(|tc| ToolCall {
                    tool_call_id: tc.id,
                    tool_name: tc.function.name,
                    arguments: tc.function.arguments,
                })
                .collect::<Vec<_>>()
        });

        Ok(ChatResponse {
            text,
            tool_calls,
            finish_reason: map_finish_reason(choice.finish_reason.as_deref()),
            usage,
            metadata,
            warnings,
            request_body: Some(request_body),
        })
    }

    /// Streaming generation
    pub async fn stream(&self, request: ChatRequest) -> Result<ChatStreamResponse, LlmError> {
        let (body, warnings) = self.build_args(&request, true)?;
        let request_body = serde_json::to_string(&body)?;

        debug!(model = %self.model_id, "opening chat completion stream");

        let response = self
            .config
            .http_client
            .post(self.config.url("/chat/completions"))
            .headers(self.config.headers()?)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(map_error_body(status.as_u16(), &text));
        }

        let stream = StreamFactory::from_response(response, ZhipuEventConverter::new());

        Ok(ChatStreamResponse {
            stream,
            warnings,
            request_body,
        })
    }
}
