use super::StoreContext;
use anyhow::Result;
use parlance_core::dialog::DialogStackSnapshot;
use serde_json::{Value, json};

pub async fn run(ctx: &StoreContext, channel: &str, conversation: &str) -> Result<()> {
    let key = ctx.key(channel, conversation)?;
    let snapshot = ctx.accessor().load(&key).await?;

    if snapshot.is_empty() {
        println!("No active dialogs for {}", key);
        return Ok(());
    }
    println!("{}", serde_json::to_string_pretty(&render(&snapshot))?);
    Ok(())
}

/// Renders the stack top first, decoding instance state when it is JSON.
fn render(snapshot: &DialogStackSnapshot) -> Value {
    let entries: Vec<Value> = snapshot
        .dialog_stack
        .iter()
        .enumerate()
        .map(|(position, instance)| {
            let state = match serde_json::from_slice::<Value>(&instance.state) {
                Ok(value) => value,
                Err(_) if instance.state.is_empty() => Value::Null,
                Err(_) => json!({ "opaqueBytes": instance.state.len() }),
            };
            json!({
                "position": position,
                "id": instance.id,
                "state": state,
            })
        })
        .collect();
    Value::Array(entries)
}
