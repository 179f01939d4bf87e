//! `quire chat`

use super::CommandContext;
use quire_core::ResponseFormat;
use serde_json::Value;

pub async fn run(ctx: &CommandContext, prompt: &str, json: bool, stream: bool) -> anyhow::Result<()> {
    if stream {
        let chat_stream = ctx
            .client
            .chat_completion_stream(prompt, ctx.token.clone())
            .await?;
        return ctx.print_stream(chat_stream).await;
    }

    let format = if json {
        ResponseFormat::JsonObject
    } else {
        ResponseFormat::Text
    };
    let completion = ctx
        .cancellable(ctx.client.chat_completion(prompt, format))
        .await?;

    if json {
        let value: Value = completion.parse_json_content()?;
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        match completion.content() {
            Some(content) => println!("{}", content),
            None => ctx.console.warn("The provider returned no message content"),
        }
    }
    Ok(())
}
