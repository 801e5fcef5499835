use super::StoreContext;
use anyhow::Result;

pub fn run(ctx: &StoreContext) -> Result<()> {
    let keys = ctx.store.keys()?;
    if keys.is_empty() {
        println!("No stored dialog stacks in {}", ctx.store.base_dir().display());
        return Ok(());
    }
    for key in keys {
        println!("{}", key);
    }
    Ok(())
}
