use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use herald_rules::{Attribute, Improvement, Skill, SkillTemplate};

use super::{Context, describe, dots};

pub async fn set_attribute(ctx: &Context, attribute: Attribute, rating: u8) -> Result<(), String> {
    let updated = ctx
        .service
        .set_attribute(&ctx.owner, ctx.name(), attribute, rating)
        .await
        .map_err(describe)?;
    println!("  {attribute}: {} -> {rating}", updated.value);
    let c = &updated.character;
    println!(
        "  health {}, willpower {}",
        c.health().capacity(),
        c.willpower().capacity()
    );
    Ok(())
}

pub async fn set_skill(ctx: &Context, skill: Skill, rating: u8) -> Result<(), String> {
    let updated = ctx
        .service
        .set_skill(&ctx.owner, ctx.name(), skill, rating)
        .await
        .map_err(describe)?;
    println!("  {skill}: {} -> {rating}", updated.value);
    Ok(())
}

pub async fn template(ctx: &Context, template: SkillTemplate) -> Result<(), String> {
    let updated = ctx
        .service
        .apply_template(&ctx.owner, ctx.name(), template)
        .await
        .map_err(describe)?;
    println!("  Applied the {template} template");
    for (skill, specialty) in &updated.value {
        println!("  {} {skill} ({specialty})", "dropped".yellow());
    }
    Ok(())
}

pub async fn add_specialty(ctx: &Context, skill: Skill, name: &str) -> Result<(), String> {
    ctx.service
        .add_specialty(&ctx.owner, ctx.name(), skill, name)
        .await
        .map_err(describe)?;
    println!("  Added specialty {skill} ({})", name.trim());
    Ok(())
}

pub async fn remove_specialty(ctx: &Context, skill: Skill, name: &str) -> Result<(), String> {
    let removed = ctx
        .service
        .remove_specialty(&ctx.owner, ctx.name(), skill, name)
        .await
        .map_err(describe)?
        .value;
    println!("  Removed specialty {skill} ({removed})");
    Ok(())
}

pub async fn earn(ctx: &Context, amount: u32, reason: &str) -> Result<(), String> {
    let updated = ctx
        .service
        .earn_xp(&ctx.owner, ctx.name(), amount, reason)
        .await
        .map_err(describe)?;
    println!(
        "  +{amount} XP, {} available",
        updated.character.experience().available()
    );
    Ok(())
}

pub async fn spend(ctx: &Context, amount: u32, reason: &str) -> Result<(), String> {
    let updated = ctx
        .service
        .spend_xp(&ctx.owner, ctx.name(), amount, reason)
        .await
        .map_err(describe)?;
    println!(
        "  -{amount} XP, {} available",
        updated.character.experience().available()
    );
    Ok(())
}

pub async fn set_xp(
    ctx: &Context,
    earned: Option<u32>,
    spent: Option<u32>,
    reason: &str,
) -> Result<(), String> {
    if earned.is_none() && spent.is_none() {
        return Err("give --earned, --spent or both".into());
    }
    let updated = ctx
        .service
        .set_xp(&ctx.owner, ctx.name(), earned, spent, reason)
        .await
        .map_err(describe)?;
    let xp = updated.character.experience();
    println!(
        "  experience: {} earned, {} spent, {} available",
        xp.earned(),
        xp.spent(),
        xp.available()
    );
    Ok(())
}

pub async fn log(ctx: &Context, page: usize) -> Result<(), String> {
    let page = ctx
        .service
        .xp_log(&ctx.owner, ctx.name(), page)
        .await
        .map_err(describe)?;

    if page.entries.is_empty() {
        println!("  No experience history.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["When", "Change"]);
    for entry in &page.entries {
        table.add_row(vec![
            entry.timestamp().format("%Y-%m-%d %H:%M").to_string(),
            entry.to_string(),
        ]);
    }
    println!("{table}");
    println!();
    println!(
        "  page {}/{}: {} earned, {} spent",
        page.page, page.pages, page.earned, page.spent
    );
    Ok(())
}

pub async fn improve(ctx: &Context, improvement: Improvement) -> Result<(), String> {
    let purchase = ctx
        .service
        .purchase(&ctx.owner, ctx.name(), improvement)
        .await
        .map_err(describe)?
        .value;
    match purchase.new_rating {
        Some(rating) => println!(
            "  {} {} {}",
            "Bought".green().bold(),
            purchase.improvement,
            dots(rating, 5)
        ),
        None => println!("  {} {}", "Bought".green().bold(), purchase.improvement),
    }
    println!(
        "  cost {} XP, {} available",
        purchase.cost, purchase.available
    );
    Ok(())
}
