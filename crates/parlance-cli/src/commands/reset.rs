use super::StoreContext;
use anyhow::Result;

pub async fn run(ctx: &StoreContext, channel: &str, conversation: &str) -> Result<()> {
    let key = ctx.key(channel, conversation)?;
    ctx.accessor().delete(&key).await?;
    println!("Reset dialog stack for {}", key);
    Ok(())
}
