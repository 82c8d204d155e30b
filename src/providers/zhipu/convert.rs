//! Conversion from generic chat messages to the Zhipu wire format

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};

use super::types::{
    ZhipuFunctionCall, ZhipuMediaUrl, ZhipuMessage, ZhipuToolCall, ZhipuUserContent,
    ZhipuUserContentPart,
};
use crate::error::LlmError;
use crate::types::{ChatMessage, ContentPart, MediaSource, MessageRole, ToolResultOutput};

/// Converts a conversation into Zhipu chat messages.
///
/// A trailing assistant message is marked with `prefix: true` so the model
/// continues it instead of starting a new turn. Reasoning parts have no wire
/// representation and are dropped.
pub fn convert_messages(messages: &[ChatMessage]) -> Result<Vec<ZhipuMessage>, LlmError> {
    let mut out = Vec::with_capacity(messages.len());

    for (i, message) in messages.iter().enumerate() {
        let is_last = i == messages.len() - 1;
        match message.role {
            MessageRole::System => out.push(convert_system(message)?),
            MessageRole::User => out.push(convert_user(message)?),
            MessageRole::Assistant => out.push(convert_assistant(message, is_last)?),
            MessageRole::Tool => out.extend(convert_tool(message)?),
        }
    }

    Ok(out)
}

fn convert_system(message: &ChatMessage) -> Result<ZhipuMessage, LlmError> {
    let mut text = String::new();
    for part in &message.content {
        match part {
            ContentPart::Text { text: t } => text.push_str(t),
            other => {
                return Err(LlmError::InvalidInput(format!(
                    "system messages only support text content, got {}",
                    part_name(other)
                )));
            }
        }
    }
    Ok(ZhipuMessage::System { content: text })
}

fn convert_user(message: &ChatMessage) -> Result<ZhipuMessage, LlmError> {
    // All-text content collapses to a plain string, matching what the API
    // expects from text-only conversations.
    if message
        .content
        .iter()
        .all(|p| matches!(p, ContentPart::Text { .. }))
    {
        let text = message
            .content
            .iter()
            .map(|p| match p {
                ContentPart::Text { text } => text.as_str(),
                _ => unreachable!(),
            })
            .collect::<String>();
        return Ok(ZhipuMessage::User {
            content: ZhipuUserContent::Text(text),
        });
    }

    let mut parts = Vec::with_capacity(message.content.len());
    for part in &message.content {
        match part {
            ContentPart::Text { text } => parts.push(ZhipuUserContentPart::Text {
                text: text.clone(),
            }),
            ContentPart::File { source, media_type } => {
                parts.push(convert_file_part(source, media_type)?)
            }
            other => {
                return Err(LlmError::InvalidInput(format!(
                    "user messages do not support {} content",
                    part_name(other)
                )));
            }
        }
    }
    Ok(ZhipuMessage::User {
        content: ZhipuUserContent::Parts(parts),
    })
}

fn convert_file_part(
    source: &MediaSource,
    media_type: &str,
) -> Result<ZhipuUserContentPart, LlmError> {
    if media_type.starts_with("image/") || media_type == "image" {
        let url = match source {
            MediaSource::Url { url } => url.clone(),
            // Base64 payloads go on the wire as-is; Zhipu accepts bare base64.
            MediaSource::Base64 { data } => data.clone(),
            MediaSource::Binary { data } => {
                let media_type = if media_type == "image" {
                    "image/jpeg"
                } else {
                    media_type
                };
                format!("data:{};base64,{}", media_type, BASE64.encode(data))
            }
        };
        return Ok(ZhipuUserContentPart::ImageUrl {
            image_url: ZhipuMediaUrl { url },
        });
    }

    if media_type.starts_with("video/") || media_type == "video" {
        return match source {
            MediaSource::Url { url } => Ok(ZhipuUserContentPart::VideoUrl {
                video_url: ZhipuMediaUrl { url: url.clone() },
            }),
            _ => Err(LlmError::UnsupportedOperation(
                "video file parts with binary data".to_string(),
            )),
        };
    }

    Err(LlmError::UnsupportedOperation(format!(
        "file part media type: {media_type}"
    )))
}

fn convert_assistant(message: &ChatMessage, is_last: bool) -> Result<ZhipuMessage, LlmError> {
    let mut text = String::new();
    let mut tool_calls = Vec::new();

    for part in &message.content {
        match part {
            ContentPart::Text { text: t } => text.push_str(t),
            // Reasoning has no outbound representation.
            ContentPart::Reasoning { .. } => {}
            ContentPart::ToolCall {
                tool_call_id,
                tool_name,
                arguments,
            } => tool_calls.push(ZhipuToolCall {
                id: tool_call_id.clone(),
                kind: "function".to_string(),
                function: ZhipuFunctionCall {
                    name: tool_name.clone(),
                    arguments: serde_json::to_string(arguments)?,
                },
            }),
            other => {
                return Err(LlmError::InvalidInput(format!(
                    "assistant messages do not support {} content",
                    part_name(other)
                )));
            }
        }
    }

    Ok(ZhipuMessage::Assistant {
        content: text,
        prefix: is_last.then_some(true),
        tool_calls: if tool_calls.is_empty() {
            None
        } else {
            Some(tool_calls)
        },
    })
}

fn convert_tool(message: &ChatMessage) -> Result<Vec<ZhipuMessage>, LlmError> {
    let mut out = Vec::with_capacity(message.content.len());
    for part in &message.content {
        match part {
            ContentPart::ToolResult {
                tool_call_id,
                output,
                ..
            } => {
                let content = match output {
                    ToolResultOutput::Text { value } | ToolResultOutput::ErrorText { value } => {
                        value.clone()
                    }
                    ToolResultOutput::Json { value }
                    | ToolResultOutput::ErrorJson { value }
                    | ToolResultOutput::Content { value } => serde_json::to_string(value)?,
                };
                out.push(ZhipuMessage::Tool {
                    content,
                    tool_call_id: tool_call_id.clone(),
                });
            }
            other => {
                return Err(LlmError::InvalidInput(format!(
                    "tool messages only support tool-result content, got {}",
                    part_name(other)
                )));
            }
        }
    }
    Ok(out)
}

fn part_name(part: &ContentPart) -> &'static str {
    match part {
        ContentPart::Text { .. } => "text",
        ContentPart::File { .. } => "file",
        ContentPart::ToolCall { .. } => "tool-call",
        ContentPart::ToolResult { .. } => "tool-result",
        ContentPart::Reasoning { .. } => "reasoning",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_text_collapses_to_string_content() {
        let messages = vec![ChatMessage::user("Hello")];
        let converted = convert_messages(&messages).unwrap();
        assert_eq!(
            serde_json::to_value(&converted).unwrap(),
            json!([{ "role": "user", "content": "Hello" }])
        );
    }

    #[test]
    fn multiple_text_parts_are_joined() {
        let messages = vec![ChatMessage::with_parts(
            MessageRole::User,
            vec![ContentPart::text("Hello, "), ContentPart::text("world!")],
        )];
        let converted = convert_messages(&messages).unwrap();
        assert_eq!(
            serde_json::to_value(&converted).unwrap(),
            json!([{ "role": "user", "content": "Hello, world!" }])
        );
    }

    #[test]
    fn image_url_becomes_typed_part() {
        let messages = vec![ChatMessage::with_parts(
            MessageRole::User,
            vec![
                ContentPart::text("describe this"),
                ContentPart::image_url("https://example.com/cat.png"),
            ],
        )];
        let converted = convert_messages(&messages).unwrap();
        assert_eq!(
            serde_json::to_value(&converted).unwrap(),
            json!([{
                "role": "user",
                "content": [
                    { "type": "text", "text": "describe this" },
                    { "type": "image_url", "image_url": { "url": "https://example.com/cat.png" } },
                ],
            }])
        );
    }

    #[test]
    fn binary_image_is_encoded_as_data_uri() {
        let messages = vec![ChatMessage::with_parts(
            MessageRole::User,
            vec![ContentPart::image_bytes(vec![0xFF, 0xD8, 0xFF], "image/jpeg")],
        )];
        let converted = convert_messages(&messages).unwrap();
        let json = serde_json::to_value(&converted).unwrap();
        let url = json[0]["content"][0]["image_url"]["url"].as_str().unwrap();
        assert!(url.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn base64_image_is_sent_verbatim() {
        let messages = vec![ChatMessage::with_parts(
            MessageRole::User,
            vec![ContentPart::File {
                source: MediaSource::base64("aGVsbG8="),
                media_type: "image/png".to_string(),
            }],
        )];
        let converted = convert_messages(&messages).unwrap();
        let json = serde_json::to_value(&converted).unwrap();
        assert_eq!(json[0]["content"][0]["image_url"]["url"], "aGVsbG8=");
    }

    #[test]
    fn video_requires_a_url() {
        let messages = vec![ChatMessage::with_parts(
            MessageRole::User,
            vec![ContentPart::File {
                source: MediaSource::url("https://example.com/clip.mp4"),
                media_type: "video/mp4".to_string(),
            }],
        )];
        let converted = convert_messages(&messages).unwrap();
        let json = serde_json::to_value(&converted).unwrap();
        assert_eq!(
            json[0]["content"][0],
            json!({ "type": "video_url", "video_url": { "url": "https://example.com/clip.mp4" } })
        );

        let messages = vec![ChatMessage::with_parts(
            MessageRole::User,
            vec![ContentPart::File {
                source: MediaSource::binary(vec![1, 2, 3]),
                media_type: "video/mp4".to_string(),
            }],
        )];
        assert!(matches!(
            convert_messages(&messages),
            Err(LlmError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn unsupported_media_type_is_rejected() {
        let messages = vec![ChatMessage::with_parts(
            MessageRole::User,
            vec![ContentPart::File {
                source: MediaSource::url("https://example.com/doc.pdf"),
                media_type: "application/pdf".to_string(),
            }],
        )];
        assert!(matches!(
            convert_messages(&messages),
            Err(LlmError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn assistant_tool_call_serializes_arguments() {
        let messages = vec![
            ChatMessage::user("weather?"),
            ChatMessage::with_parts(
                MessageRole::Assistant,
                vec![ContentPart::tool_call(
                    "call_1",
                    "get_weather",
                    json!({ "city": "Beijing" }),
                )],
            ),
            ChatMessage::tool_result(
                "call_1",
                "get_weather",
                ToolResultOutput::json(json!({ "temp": 21 })),
            ),
        ];
        let converted = convert_messages(&messages).unwrap();
        assert_eq!(
            serde_json::to_value(&converted).unwrap(),
            json!([
                { "role": "user", "content": "weather?" },
                {
                    "role": "assistant",
                    "content": "",
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": { "name": "get_weather", "arguments": "{\"city\":\"Beijing\"}" },
                    }],
                },
                { "role": "tool", "content": "{\"temp\":21}", "tool_call_id": "call_1" },
            ])
        );
    }

    #[test]
    fn trailing_assistant_message_gets_prefix() {
        let messages = vec![
            ChatMessage::user("continue this"),
            ChatMessage::assistant("Once upon a"),
        ];
        let converted = convert_messages(&messages).unwrap();
        assert_eq!(
            serde_json::to_value(&converted).unwrap()[1],
            json!({ "role": "assistant", "content": "Once upon a", "prefix": true })
        );
    }

    #[test]
    fn non_trailing_assistant_message_has_no_prefix() {
        let messages = vec![
            ChatMessage::user("hi"),
            ChatMessage::assistant("hello"),
            ChatMessage::user("again"),
        ];
        let converted = convert_messages(&messages).unwrap();
        assert_eq!(
            serde_json::to_value(&converted).unwrap()[1],
            json!({ "role": "assistant", "content": "hello" })
        );
    }

    #[test]
    fn reasoning_parts_are_dropped() {
        let messages = vec![
            ChatMessage::user("hi"),
            ChatMessage::with_parts(
                MessageRole::Assistant,
                vec![
                    ContentPart::Reasoning {
                        text: "thinking...".to_string(),
                    },
                    ContentPart::text("hello"),
                ],
            ),
            ChatMessage::user("more"),
        ];
        let converted = convert_messages(&messages).unwrap();
        assert_eq!(
            serde_json::to_value(&converted).unwrap()[1],
            json!({ "role": "assistant", "content": "hello" })
        );
    }

    #[test]
    fn text_tool_result_is_passed_through() {
        let messages = vec![ChatMessage::tool_result(
            "call_2",
            "lookup",
            ToolResultOutput::text("42"),
        )];
        let converted = convert_messages(&messages).unwrap();
        assert_eq!(
            serde_json::to_value(&converted).unwrap(),
            json!([{ "role": "tool", "content": "42", "tool_call_id": "call_2" }])
        );
    }

    #[test]
    fn tool_call_in_user_message_is_invalid_input() {
        let messages = vec![ChatMessage::with_parts(
            MessageRole::User,
            vec![ContentPart::tool_call("x", "y", json!({}))],
        )];
        assert!(matches!(
            convert_messages(&messages),
            Err(LlmError::InvalidInput(_))
        ));
    }
}
