use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use super::{Context, describe};

/// Note bodies longer than this are cut short in the list.
const PREVIEW_CHARS: usize = 100;

pub async fn list_items(ctx: &Context) -> Result<(), String> {
    let c = ctx
        .service
        .sheet(&ctx.owner, ctx.name())
        .await
        .map_err(describe)?;
    let items = c.items();
    if items.is_empty() {
        println!("  {} carries no equipment.", c.name());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Item", "Description"]);
    for item in &items {
        table.add_row(vec![
            item.name.clone(),
            item.description.clone().unwrap_or_default(),
        ]);
    }
    println!("{table}");
    println!();
    println!("  {} items", items.len());
    Ok(())
}

pub async fn add_item(ctx: &Context, item: &str, description: Option<&str>) -> Result<(), String> {
    let added = ctx
        .service
        .add_item(&ctx.owner, ctx.name(), item, description)
        .await
        .map_err(describe)?;
    println!(
        "  {} {} to {}",
        "Added".green().bold(),
        added.value.name,
        added.character.name()
    );
    Ok(())
}

pub async fn remove_item(ctx: &Context, item: &str) -> Result<(), String> {
    let removed = ctx
        .service
        .remove_item(&ctx.owner, ctx.name(), item)
        .await
        .map_err(describe)?;
    println!("  Removed {}", removed.value);
    Ok(())
}

pub async fn clear_items(ctx: &Context, yes: bool) -> Result<(), String> {
    confirm(yes, "equipment")?;
    let cleared = ctx
        .service
        .clear_items(&ctx.owner, ctx.name())
        .await
        .map_err(describe)?;
    println!("  Removed {} items", cleared.value);
    Ok(())
}

pub async fn list_notes(ctx: &Context) -> Result<(), String> {
    let c = ctx
        .service
        .sheet(&ctx.owner, ctx.name())
        .await
        .map_err(describe)?;
    if c.notes().next().is_none() {
        println!("  {} has no notes.", c.name());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Date", "Title", "Note"]);
    for note in c.notes() {
        table.add_row(vec![
            note.created_at.format("%Y-%m-%d").to_string(),
            note.title.clone(),
            preview(&note.content),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn add_note(ctx: &Context, title: &str, content: &str) -> Result<(), String> {
    let added = ctx
        .service
        .add_note(&ctx.owner, ctx.name(), title, content)
        .await
        .map_err(describe)?;
    println!(
        "  {} note {} for {}",
        "Wrote".green().bold(),
        added.value.title,
        added.character.name()
    );
    Ok(())
}

pub async fn remove_note(ctx: &Context, title: &str) -> Result<(), String> {
    let removed = ctx
        .service
        .remove_note(&ctx.owner, ctx.name(), title)
        .await
        .map_err(describe)?;
    println!("  Removed {} note(s) titled {}", removed.value, title.trim());
    Ok(())
}

pub async fn clear_notes(ctx: &Context, yes: bool) -> Result<(), String> {
    confirm(yes, "notes")?;
    let cleared = ctx
        .service
        .clear_notes(&ctx.owner, ctx.name())
        .await
        .map_err(describe)?;
    println!("  Removed {} notes", cleared.value);
    Ok(())
}

fn confirm(yes: bool, what: &str) -> Result<(), String> {
    if yes {
        Ok(())
    } else {
        Err(format!("this removes all {what} and cannot be undone; pass --yes to confirm"))
    }
}

fn preview(content: &str) -> String {
    if content.chars().count() <= PREVIEW_CHARS {
        return content.to_string();
    }
    let cut: String = content.chars().take(PREVIEW_CHARS).collect();
    format!("{cut}...")
}
