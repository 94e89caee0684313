use herald_rules::Edge;

use super::{Context, describe};

pub async fn add_edge(ctx: &Context, edge: Edge) -> Result<(), String> {
    ctx.service
        .add_edge(&ctx.owner, ctx.name(), edge)
        .await
        .map_err(describe)?;
    println!("  Acquired {edge}");
    println!("  perks: {}", edge.perks().join(", "));
    Ok(())
}

pub async fn remove_edge(ctx: &Context, edge: Edge) -> Result<(), String> {
    let perks = ctx
        .service
        .remove_edge(&ctx.owner, ctx.name(), edge)
        .await
        .map_err(describe)?
        .value;
    println!("  Removed {edge}");
    if !perks.is_empty() {
        println!("  also removed: {}", perks.join(", "));
    }
    Ok(())
}

pub async fn add_perk(ctx: &Context, edge: Edge, perk: &str) -> Result<(), String> {
    let name = ctx
        .service
        .add_perk(&ctx.owner, ctx.name(), edge, perk)
        .await
        .map_err(describe)?
        .value;
    println!("  Acquired {edge}: {name}");
    Ok(())
}

pub async fn remove_perk(ctx: &Context, edge: Edge, perk: &str) -> Result<(), String> {
    let name = ctx
        .service
        .remove_perk(&ctx.owner, ctx.name(), edge, perk)
        .await
        .map_err(describe)?
        .value;
    println!("  Removed {edge}: {name}");
    Ok(())
}
