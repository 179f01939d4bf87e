//! `quire image`

use super::CommandContext;

pub async fn run(ctx: &CommandContext, description: &str, raw: bool) -> anyhow::Result<()> {
    let image = ctx
        .cancellable(ctx.client.generate_image(description))
        .await?;

    if raw {
        println!("{}", serde_json::to_string_pretty(image.raw())?);
        return Ok(());
    }

    let urls = image.urls();
    let inline = image.base64_images();
    for url in &urls {
        println!("{}", url);
    }
    if !inline.is_empty() {
        ctx.console.success(&format!(
            "{} inline image(s) returned; use --raw to print them",
            inline.len()
        ));
    }
    if urls.is_empty() && inline.is_empty() {
        ctx.console.warn("The provider returned no images");
    }
    Ok(())
}
