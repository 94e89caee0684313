use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use herald_rules::{Creed, Drive, Edge, Skill};

pub fn run(topic: Option<&str>) -> Result<(), String> {
    match topic.map(|t| t.trim().to_lowercase()).as_deref() {
        None => {
            println!("  Topics: skills, edges, creeds, drives");
            Ok(())
        }
        Some("skills") => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Skill", "Category"]);
            for skill in Skill::all() {
                table.add_row(vec![skill.name().to_string(), skill.category().to_string()]);
            }
            println!("{table}");
            Ok(())
        }
        Some("edges") => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Edge", "Category", "Perks"]);
            for edge in Edge::all() {
                table.add_row(vec![
                    edge.name().to_string(),
                    edge.category().to_string(),
                    edge.perks().join(", "),
                ]);
            }
            println!("{table}");
            Ok(())
        }
        Some("creeds") => {
            for creed in Creed::all() {
                println!("  {:<16} {}", creed.to_string().bold(), creed.field());
            }
            Ok(())
        }
        Some("drives") => {
            for drive in Drive::all() {
                println!("  {:<12} {}", drive.to_string().bold(), drive.redemption());
            }
            Ok(())
        }
        Some(other) => Err(format!(
            "unknown catalog topic '{other}' (skills, edges, creeds or drives)"
        )),
    }
}
