use colored::Colorize;
use herald_rules::{
    CharacterRoll, DespairEffect, DespairState, DesperationSource, OverreachChoice,
    OverreachResolution,
};

use super::{Context, describe, parse};

pub async fn roll(
    ctx: &Context,
    pool: u32,
    difficulty: u32,
    desperation: Option<u32>,
    desperate: bool,
    danger: bool,
) -> Result<(), String> {
    let source = match (desperation, desperate) {
        (Some(n), _) => DesperationSource::Dice(n),
        (None, true) => DesperationSource::Rating,
        (None, false) => DesperationSource::None,
    };
    let mut request = CharacterRoll::new(pool, difficulty).with_desperation(source);
    if danger {
        request = request.with_danger();
    }

    let updated = ctx
        .service
        .roll(&ctx.owner, ctx.name(), request)
        .await
        .map_err(describe)?;
    let report = updated.value;
    let outcome = &report.outcome;

    let regular: Vec<String> = outcome.regular().iter().map(u8::to_string).collect();
    println!("  {} [{}]", "dice:".dimmed(), regular.join(", "));
    let desperation: Vec<String> = outcome.desperation().iter().map(u8::to_string).collect();
    if !desperation.is_empty() {
        println!("  {} [{}]", "desperation:".dimmed(), desperation.join(", ").yellow());
    }
    if report.suppressed_desperation > 0 {
        println!(
            "  {} desperation dice dropped while in despair",
            report.suppressed_desperation
        );
    }

    let tier = outcome.tier().to_string();
    let tier = if outcome.is_success() {
        tier.green().bold()
    } else {
        tier.red().bold()
    };
    print!("  {} successes, {tier}", outcome.total_successes);
    match outcome.margin() {
        Some(margin) => println!(" (target {}, margin {margin:+})", outcome.target),
        None => println!(),
    }

    match report.effect {
        DespairEffect::None => {}
        DespairEffect::OverreachPending(pending) => {
            println!(
                "  {} {} desperation 1s on a success: choose `herald overreach overreach` (danger +{}) or `herald overreach despair`",
                "Overreach!".yellow().bold(),
                pending.desperation_ones,
                pending.desperation_ones
            );
        }
        DespairEffect::FellIntoDespair => {
            println!("  {} the hunter falls into despair", "Despair!".red().bold());
        }
    }
    Ok(())
}

pub async fn overreach(ctx: &Context, choice: OverreachChoice) -> Result<(), String> {
    let report = ctx
        .service
        .resolve_overreach(&ctx.owner, ctx.name(), choice)
        .await
        .map_err(describe)?
        .value;
    match report.resolution {
        OverreachResolution::DangerRaised(by) => {
            println!("  Success kept. Danger +{by}, now {}", report.danger);
        }
        OverreachResolution::EnteredDespair => {
            println!("  Success given up. {}", report.state.to_string().red().bold());
        }
    }
    Ok(())
}

pub async fn desperation(ctx: &Context, action: &str, value: Option<u8>) -> Result<(), String> {
    let change = parse::adjustment(action, value)?;
    let rating = ctx
        .service
        .adjust_desperation(&ctx.owner, ctx.name(), change)
        .await
        .map_err(describe)?
        .value;
    println!("  desperation: {rating}");
    Ok(())
}

pub async fn danger(ctx: &Context, action: &str, value: Option<u8>) -> Result<(), String> {
    let change = parse::adjustment(action, value)?;
    let rating = ctx
        .service
        .adjust_danger(&ctx.owner, ctx.name(), change)
        .await
        .map_err(describe)?
        .value;
    println!("  danger: {rating}");
    Ok(())
}

pub async fn despair(ctx: &Context) -> Result<(), String> {
    let updated = ctx
        .service
        .enter_despair(&ctx.owner, ctx.name())
        .await
        .map_err(describe)?;
    print_state(updated.value);
    if let Some(redemption) = updated.character.redemption() {
        println!("  redemption: {redemption}");
    }
    Ok(())
}

pub async fn redeem(ctx: &Context) -> Result<(), String> {
    let state = ctx
        .service
        .redeem(&ctx.owner, ctx.name())
        .await
        .map_err(describe)?
        .value;
    print_state(state);
    Ok(())
}

fn print_state(state: DespairState) {
    let label = state.to_string();
    match state {
        DespairState::Active => println!("  state: {}", label.green()),
        DespairState::Despair => println!("  state: {}", label.red().bold()),
    }
}
