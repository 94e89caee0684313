use herald_rules::{DamageKind, DamageTrack, TrackKind};

use super::{Context, describe, parse, track_boxes};

pub async fn damage(ctx: &Context, track: TrackKind, kind: DamageKind, amount: u32) -> Result<(), String> {
    let updated = ctx
        .service
        .damage(&ctx.owner, ctx.name(), track, kind, amount)
        .await
        .map_err(describe)?;
    print_track(track, &updated.value);
    Ok(())
}

pub async fn heal(ctx: &Context, track: TrackKind, kind: &str, amount: Option<u32>) -> Result<(), String> {
    let healing = parse::healing(kind, amount)?;
    let updated = ctx
        .service
        .heal(&ctx.owner, ctx.name(), track, healing)
        .await
        .map_err(describe)?;
    print_track(track, &updated.value);
    Ok(())
}

fn print_track(kind: TrackKind, track: &DamageTrack) {
    println!("  {kind}: {} {track}", track_boxes(track));
    if track.is_incapacitated() {
        match kind {
            TrackKind::Health => println!("  Incapacitated: the hunter cannot act until healed"),
            TrackKind::Willpower => println!("  Broken: the hunter's will is spent"),
        }
    }
}
