use super::{Context, describe, parse};

pub async fn creed(ctx: &Context, creed: &str) -> Result<(), String> {
    let creed = parse::optional_creed(creed)?;
    let updated = ctx
        .service
        .set_creed(&ctx.owner, ctx.name(), creed)
        .await
        .map_err(describe)?;
    match updated.character.creed() {
        Some(c) => println!("  creed: {c} ({})", c.field()),
        None => println!("  creed cleared"),
    }
    Ok(())
}

pub async fn drive(ctx: &Context, drive: &str) -> Result<(), String> {
    let drive = parse::optional_drive(drive)?;
    let updated = ctx
        .service
        .set_drive(&ctx.owner, ctx.name(), drive)
        .await
        .map_err(describe)?;
    match updated.character.drive() {
        Some(d) => println!("  drive: {d} (redemption: {})", d.redemption()),
        None => println!("  drive cleared"),
    }
    Ok(())
}

pub async fn ambition(ctx: &Context, text: &str) -> Result<(), String> {
    ctx.service
        .set_ambition(&ctx.owner, ctx.name(), text)
        .await
        .map_err(describe)?;
    println!("  ambition: {}", text.trim());
    Ok(())
}

pub async fn desire(ctx: &Context, text: &str) -> Result<(), String> {
    ctx.service
        .set_desire(&ctx.owner, ctx.name(), text)
        .await
        .map_err(describe)?;
    println!("  desire: {}", text.trim());
    Ok(())
}
