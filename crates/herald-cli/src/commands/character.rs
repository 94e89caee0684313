use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use herald_rules::{
    Attribute, AttributeGroup, Attributes, Character, Creed, Drive, Skill, SkillCategory,
    SkillTemplate,
};
use herald_service::NewCharacter;

use super::{Context, describe, dots, track_boxes};

pub struct NewArgs {
    pub name: String,
    pub attrs: Vec<(Attribute, u8)>,
    pub creed: Option<Creed>,
    pub drive: Option<Drive>,
    pub template: Option<SkillTemplate>,
    pub ambition: Option<String>,
    pub desire: Option<String>,
}

pub async fn create(ctx: &Context, args: NewArgs) -> Result<(), String> {
    let attributes = Attributes::from_ratings(&args.attrs).map_err(|e| e.to_string())?;
    let mut new = NewCharacter::new(args.name).with_attributes(attributes);
    if let Some(creed) = args.creed {
        new = new.with_creed(creed);
    }
    if let Some(drive) = args.drive {
        new = new.with_drive(drive);
    }
    if let Some(template) = args.template {
        new = new.with_template(template);
    }
    if let Some(ambition) = args.ambition {
        new = new.with_ambition(ambition);
    }
    if let Some(desire) = args.desire {
        new = new.with_desire(desire);
    }

    let character = ctx.service.create(&ctx.owner, new).await.map_err(describe)?;
    println!(
        "  {} {} (health {}, willpower {})",
        "Created".green().bold(),
        character.name().bold(),
        character.health().capacity(),
        character.willpower().capacity()
    );
    Ok(())
}

pub async fn delete(ctx: &Context, name: &str) -> Result<(), String> {
    ctx.service
        .delete(&ctx.owner, name)
        .await
        .map_err(describe)?;
    println!("  {} {name}", "Deleted".red().bold());
    Ok(())
}

pub async fn switch(ctx: &Context, name: &str) -> Result<(), String> {
    let character = ctx
        .service
        .switch(&ctx.owner, name)
        .await
        .map_err(describe)?;
    println!("  Now playing {}", character.name().bold());
    Ok(())
}

pub async fn list(ctx: &Context) -> Result<(), String> {
    let roster = ctx.service.list(&ctx.owner).await.map_err(describe)?;

    if roster.characters.is_empty() {
        println!("  No characters yet. Create one with `herald create <name>`.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", "Name", "Creed", "Drive", "Health", "Willpower", "State"]);

    for c in &roster.characters {
        let marker = if roster.is_active(c) { "*" } else { "" };
        table.add_row(vec![
            marker.to_string(),
            c.name().to_string(),
            c.creed().map_or_else(|| "-".into(), |v| v.to_string()),
            c.drive().map_or_else(|| "-".into(), |v| v.to_string()),
            format!("{}/{}", c.health().remaining(), c.health().capacity()),
            format!("{}/{}", c.willpower().remaining(), c.willpower().capacity()),
            c.despair().state().to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} characters", roster.characters.len());
    Ok(())
}

pub async fn sheet(ctx: &Context) -> Result<(), String> {
    let c = ctx
        .service
        .sheet(&ctx.owner, ctx.name())
        .await
        .map_err(describe)?;
    print_sheet(&c);
    Ok(())
}

fn print_sheet(c: &Character) {
    let creed = c.creed().map_or_else(|| "no creed".into(), |v| v.to_string());
    let drive = c.drive().map_or_else(|| "no drive".into(), |v| v.to_string());
    println!("  {} [{}, {}]", c.name().bold(), creed.dimmed(), drive.dimmed());
    if !c.ambition().is_empty() {
        println!("  ambition: {}", c.ambition());
    }
    if !c.desire().is_empty() {
        println!("  desire:   {}", c.desire());
    }
    println!();

    println!("  {}", "Attributes".bold().underline());
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    let groups = [AttributeGroup::Physical, AttributeGroup::Social, AttributeGroup::Mental];
    table.set_header(groups.iter().map(ToString::to_string).collect::<Vec<_>>());
    let columns: Vec<Vec<Attribute>> = groups
        .iter()
        .map(|g| Attribute::all().iter().copied().filter(|a| a.group() == *g).collect())
        .collect();
    for row in 0..3 {
        table.add_row(
            columns
                .iter()
                .map(|col| {
                    col.get(row)
                        .map(|a| format!("{:<13}{}", a.name(), dots(c.attribute(*a), 5)))
                        .unwrap_or_default()
                })
                .collect::<Vec<_>>(),
        );
    }
    println!("{table}");
    println!();

    println!("  {}", "Skills".bold().underline());
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Category", "Skill", "Rating", "Specialties"]);
    for category in [SkillCategory::Physical, SkillCategory::Social, SkillCategory::Mental] {
        for skill in Skill::all().iter().copied().filter(|s| s.category() == category) {
            let rating = c.skill(skill);
            if rating == 0 {
                continue;
            }
            table.add_row(vec![
                category.to_string(),
                skill.name().to_string(),
                dots(rating, 5),
                c.specialties(skill).join(", "),
            ]);
        }
    }
    println!("{table}");
    println!();

    println!("  health:      {} {}", track_boxes(c.health()), c.health());
    println!("  willpower:   {} {}", track_boxes(c.willpower()), c.willpower());
    println!("  desperation: {}", c.desperation());
    println!("  danger:      {}", c.danger());
    let state = c.despair().state().to_string();
    if c.despair().in_despair() {
        println!("  state:       {}", state.red().bold());
        if let Some(redemption) = c.redemption() {
            println!("  redemption:  {redemption}");
        }
    } else {
        println!("  state:       {}", state.green());
    }
    if let Some(pending) = c.despair().pending() {
        println!(
            "  {} overreach pending ({} desperation 1s)",
            "!".yellow().bold(),
            pending.desperation_ones
        );
    }
    println!();

    let edges: Vec<_> = c.edges().collect();
    if !edges.is_empty() {
        println!("  {}", "Edges".bold().underline());
        for edge in edges {
            let perks = c.perks(edge);
            if perks.is_empty() {
                println!("  {edge}");
            } else {
                println!("  {edge}: {}", perks.join(", "));
            }
        }
        println!();
    }

    let xp = c.experience();
    println!(
        "  experience:  {} available ({} earned, {} spent)",
        xp.available(),
        xp.earned(),
        xp.spent()
    );
    println!(
        "  inventory:   {} items, {} notes",
        c.items().len(),
        c.notes().count()
    );
}
