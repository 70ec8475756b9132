use anyhow::{Context, Result, bail};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::responses::{
        CreateResponseArgs, InputMessage, InputRole, OutputItem, OutputMessageContent,
    },
};

/// One system + user exchange sent to the completion endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionRequest {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub max_output_tokens: u32,
}

pub async fn request_single_text_response(
    client: &Client<OpenAIConfig>,
    request: &CompletionRequest,
) -> Result<String> {
    let args = CreateResponseArgs::default()
        .model(request.model.as_str())
        .max_output_tokens(request.max_output_tokens)
        .input(vec![
            InputMessage {
                role: InputRole::System,
                content: vec![request.system_prompt.as_str().into()],
                status: None,
            },
            InputMessage {
                role: InputRole::User,
                content: vec![request.user_prompt.as_str().into()],
                status: None,
            },
        ])
        .build()?;

    let response = client
        .responses()
        .create(args)
        .await
        .with_context(|| "Failed to get response from LLM")?;

    for item in response.output {
        if let OutputItem::Message(message) = item {
            for content in message.content {
                if let OutputMessageContent::OutputText(text) = content {
                    let trimmed = text.text.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    return Ok(trimmed.to_string());
                }
            }
        }
    }

    bail!("No text output returned from model")
}
