//! CLI frontend for the Herald Hunter: The Reckoning character manager.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use herald_rules::{
    Attribute, Creed, DamageKind, Drive, Edge, OverreachChoice, Skill, SkillTemplate, TrackKind,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use commands::{Context, parse};

#[derive(Parser)]
#[command(
    name = "herald",
    about = "Herald: characters, dice and despair for Hunter: The Reckoning",
    version,
    propagate_version = true
)]
struct Cli {
    /// Character file
    #[arg(long, global = true, env = "HERALD_DATA", default_value = "herald.json")]
    data: PathBuf,

    /// Player the characters belong to
    #[arg(long, global = true, env = "HERALD_OWNER", default_value = "local")]
    owner: String,

    /// Act on this character instead of the active one
    #[arg(short, long, global = true)]
    character: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a character and make it active
    Create {
        /// Character name
        name: String,

        /// Attribute rating, e.g. `--attr strength=3` (repeatable)
        #[arg(short, long = "attr", value_parser = parse::attribute_rating)]
        attrs: Vec<(Attribute, u8)>,

        /// Creed
        #[arg(long, value_parser = parse::creed)]
        creed: Option<Creed>,

        /// Drive
        #[arg(long, value_parser = parse::drive)]
        drive: Option<Drive>,

        /// Skill template: jack, balanced, specialist
        #[arg(short, long, value_parser = parse::template)]
        template: Option<SkillTemplate>,

        /// Long-term goal
        #[arg(long)]
        ambition: Option<String>,

        /// Short-term want
        #[arg(long)]
        desire: Option<String>,
    },

    /// Delete a character
    Delete {
        /// Character name
        name: String,
    },

    /// Make another character active
    Switch {
        /// Character name
        name: String,
    },

    /// List your characters
    List,

    /// Show a character sheet
    Sheet,

    /// Roll a dice pool
    Roll {
        /// Regular dice
        pool: u32,

        /// Successes needed
        #[arg(short, long, default_value = "0")]
        difficulty: u32,

        /// Add this many desperation dice
        #[arg(long, conflicts_with = "desperate")]
        desperation: Option<u32>,

        /// Add desperation dice equal to the current desperation
        #[arg(long)]
        desperate: bool,

        /// Add the current danger to the difficulty
        #[arg(long)]
        danger: bool,
    },

    /// Settle a pending overreach: overreach or despair
    Overreach {
        /// overreach (keep the success) or despair (give it up)
        #[arg(value_parser = parse::overreach)]
        choice: OverreachChoice,
    },

    /// Mark damage on health or willpower
    Damage {
        /// health or willpower
        #[arg(value_parser = parse::track)]
        track: TrackKind,

        /// superficial or aggravated
        #[arg(value_parser = parse::damage_kind)]
        kind: DamageKind,

        /// Boxes to mark
        amount: u32,
    },

    /// Heal health or willpower
    Heal {
        /// health or willpower
        #[arg(value_parser = parse::track)]
        track: TrackKind,

        /// superficial, aggravated or all
        kind: String,

        /// Boxes to clear
        amount: Option<u32>,
    },

    /// Change desperation: set N, add N, sub N, reset
    Desperation {
        /// set, add, sub or reset
        action: String,

        /// Amount
        value: Option<u8>,
    },

    /// Change danger: set N, add N, sub N, reset
    Danger {
        /// set, add, sub or reset
        action: String,

        /// Amount
        value: Option<u8>,
    },

    /// Fall into despair
    Despair,

    /// Fulfil the drive's redemption and leave despair
    Redeem,

    /// Set the creed (or `none`)
    Creed {
        /// Creed name
        creed: String,
    },

    /// Set the drive (or `none`)
    Drive {
        /// Drive name
        drive: String,
    },

    /// Set the ambition
    Ambition {
        /// Text
        text: String,
    },

    /// Set the desire
    Desire {
        /// Text
        text: String,
    },

    /// Set an attribute rating directly
    Attribute {
        /// Attribute name
        #[arg(value_parser = parse::attribute)]
        attribute: Attribute,

        /// Rating 1-5
        rating: u8,
    },

    /// Set a skill rating directly
    Skill {
        /// Skill name
        #[arg(value_parser = parse::skill)]
        skill: Skill,

        /// Rating 0-5
        rating: u8,
    },

    /// Overwrite all skills from a template
    Template {
        /// jack, balanced or specialist
        #[arg(value_parser = parse::template)]
        template: SkillTemplate,
    },

    /// Manage specialties
    Specialty {
        #[command(subcommand)]
        action: SpecialtyAction,
    },

    /// Experience
    Xp {
        #[command(subcommand)]
        action: XpAction,
    },

    /// Buy an improvement with experience
    Improve {
        #[command(subcommand)]
        target: ImproveTarget,
    },

    /// Manage edges
    Edge {
        #[command(subcommand)]
        action: EdgeAction,
    },

    /// Manage perks
    Perk {
        #[command(subcommand)]
        action: PerkAction,
    },

    /// Manage equipment
    Equipment {
        #[command(subcommand)]
        action: EquipmentAction,
    },

    /// Keep journal notes
    Notes {
        #[command(subcommand)]
        action: NotesAction,
    },

    /// Browse skills, edges, creeds and drives
    Catalog {
        /// skills, edges, creeds or drives
        topic: Option<String>,
    },
}

#[derive(Subcommand)]
enum SpecialtyAction {
    /// Add a specialty for free
    Add {
        /// Skill
        #[arg(value_parser = parse::skill)]
        skill: Skill,
        /// Specialty name
        name: String,
    },
    /// Remove a specialty
    Remove {
        /// Skill
        #[arg(value_parser = parse::skill)]
        skill: Skill,
        /// Specialty name
        name: String,
    },
}

#[derive(Subcommand)]
enum XpAction {
    /// Award experience
    Earn {
        /// Amount
        amount: u32,
        /// Reason
        #[arg(default_value = "session")]
        reason: String,
    },
    /// Spend experience
    Spend {
        /// Amount
        amount: u32,
        /// Reason
        #[arg(default_value = "spent")]
        reason: String,
    },
    /// Correct the totals
    Set {
        /// Total earned
        #[arg(long)]
        earned: Option<u32>,
        /// Total spent
        #[arg(long)]
        spent: Option<u32>,
        /// Reason
        #[arg(long, default_value = "correction")]
        reason: String,
    },
    /// Show experience history, newest first
    Log {
        /// Page number
        #[arg(default_value = "1")]
        page: usize,
    },
}

#[derive(Subcommand)]
enum ImproveTarget {
    /// Raise an attribute by one dot
    Attribute {
        /// Attribute name
        #[arg(value_parser = parse::attribute)]
        attribute: Attribute,
    },
    /// Raise a skill by one dot
    Skill {
        /// Skill name
        #[arg(value_parser = parse::skill)]
        skill: Skill,
    },
    /// Buy a specialty
    Specialty {
        /// Skill
        #[arg(value_parser = parse::skill)]
        skill: Skill,
        /// Specialty name
        name: String,
    },
}

#[derive(Subcommand)]
enum EdgeAction {
    /// Acquire an edge
    Add {
        /// Edge name
        #[arg(value_parser = parse::edge)]
        edge: Edge,
    },
    /// Give up an edge and its perks
    Remove {
        /// Edge name
        #[arg(value_parser = parse::edge)]
        edge: Edge,
    },
}

#[derive(Subcommand)]
enum PerkAction {
    /// Acquire a perk of an acquired edge
    Add {
        /// Edge name
        #[arg(value_parser = parse::edge)]
        edge: Edge,
        /// Perk name
        perk: String,
    },
    /// Give up a perk
    Remove {
        /// Edge name
        #[arg(value_parser = parse::edge)]
        edge: Edge,
        /// Perk name
        perk: String,
    },
}

#[derive(Subcommand)]
enum EquipmentAction {
    /// Show the equipment list
    List,
    /// Add an item
    Add {
        /// Item name
        item: String,
        /// What it is or does
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Remove an item
    Remove {
        /// Item name
        item: String,
    },
    /// Remove every item
    Clear {
        /// Confirm the removal
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum NotesAction {
    /// Show notes, newest first
    List,
    /// Write a note
    Add {
        /// Note title
        title: String,
        /// Note text
        content: String,
    },
    /// Delete notes with this title
    Remove {
        /// Note title
        title: String,
    },
    /// Delete every note
    Clear {
        /// Confirm the removal
        #[arg(long)]
        yes: bool,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "herald=warn".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<(), String> {
    let ctx = Context::open(&cli.data, cli.owner, cli.character)?;

    match cli.command {
        Commands::Create {
            name,
            attrs,
            creed,
            drive,
            template,
            ambition,
            desire,
        } => {
            let new = commands::character::NewArgs {
                name,
                attrs,
                creed,
                drive,
                template,
                ambition,
                desire,
            };
            commands::character::create(&ctx, new).await
        }
        Commands::Delete { name } => commands::character::delete(&ctx, &name).await,
        Commands::Switch { name } => commands::character::switch(&ctx, &name).await,
        Commands::List => commands::character::list(&ctx).await,
        Commands::Sheet => commands::character::sheet(&ctx).await,
        Commands::Roll {
            pool,
            difficulty,
            desperation,
            desperate,
            danger,
        } => commands::roll::roll(&ctx, pool, difficulty, desperation, desperate, danger).await,
        Commands::Overreach { choice } => commands::roll::overreach(&ctx, choice).await,
        Commands::Damage {
            track,
            kind,
            amount,
        } => commands::health::damage(&ctx, track, kind, amount).await,
        Commands::Heal {
            track,
            kind,
            amount,
        } => commands::health::heal(&ctx, track, &kind, amount).await,
        Commands::Desperation { action, value } => {
            commands::roll::desperation(&ctx, &action, value).await
        }
        Commands::Danger { action, value } => commands::roll::danger(&ctx, &action, value).await,
        Commands::Despair => commands::roll::despair(&ctx).await,
        Commands::Redeem => commands::roll::redeem(&ctx).await,
        Commands::Creed { creed } => commands::hunter::creed(&ctx, &creed).await,
        Commands::Drive { drive } => commands::hunter::drive(&ctx, &drive).await,
        Commands::Ambition { text } => commands::hunter::ambition(&ctx, &text).await,
        Commands::Desire { text } => commands::hunter::desire(&ctx, &text).await,
        Commands::Attribute { attribute, rating } => {
            commands::progression::set_attribute(&ctx, attribute, rating).await
        }
        Commands::Skill { skill, rating } => {
            commands::progression::set_skill(&ctx, skill, rating).await
        }
        Commands::Template { template } => commands::progression::template(&ctx, template).await,
        Commands::Specialty { action } => match action {
            SpecialtyAction::Add { skill, name } => {
                commands::progression::add_specialty(&ctx, skill, &name).await
            }
            SpecialtyAction::Remove { skill, name } => {
                commands::progression::remove_specialty(&ctx, skill, &name).await
            }
        },
        Commands::Xp { action } => match action {
            XpAction::Earn { amount, reason } => {
                commands::progression::earn(&ctx, amount, &reason).await
            }
            XpAction::Spend { amount, reason } => {
                commands::progression::spend(&ctx, amount, &reason).await
            }
            XpAction::Set {
                earned,
                spent,
                reason,
            } => commands::progression::set_xp(&ctx, earned, spent, &reason).await,
            XpAction::Log { page } => commands::progression::log(&ctx, page).await,
        },
        Commands::Improve { target } => {
            let improvement = match target {
                ImproveTarget::Attribute { attribute } => {
                    herald_rules::Improvement::Attribute(attribute)
                }
                ImproveTarget::Skill { skill } => herald_rules::Improvement::Skill(skill),
                ImproveTarget::Specialty { skill, name } => {
                    herald_rules::Improvement::Specialty(skill, name)
                }
            };
            commands::progression::improve(&ctx, improvement).await
        }
        Commands::Edge { action } => match action {
            EdgeAction::Add { edge } => commands::edges::add_edge(&ctx, edge).await,
            EdgeAction::Remove { edge } => commands::edges::remove_edge(&ctx, edge).await,
        },
        Commands::Perk { action } => match action {
            PerkAction::Add { edge, perk } => commands::edges::add_perk(&ctx, edge, &perk).await,
            PerkAction::Remove { edge, perk } => {
                commands::edges::remove_perk(&ctx, edge, &perk).await
            }
        },
        Commands::Equipment { action } => match action {
            EquipmentAction::List => commands::inventory::list_items(&ctx).await,
            EquipmentAction::Add { item, description } => {
                commands::inventory::add_item(&ctx, &item, description.as_deref()).await
            }
            EquipmentAction::Remove { item } => commands::inventory::remove_item(&ctx, &item).await,
            EquipmentAction::Clear { yes } => commands::inventory::clear_items(&ctx, yes).await,
        },
        Commands::Notes { action } => match action {
            NotesAction::List => commands::inventory::list_notes(&ctx).await,
            NotesAction::Add { title, content } => {
                commands::inventory::add_note(&ctx, &title, &content).await
            }
            NotesAction::Remove { title } => commands::inventory::remove_note(&ctx, &title).await,
            NotesAction::Clear { yes } => commands::inventory::clear_notes(&ctx, yes).await,
        },
        Commands::Catalog { topic } => commands::catalog::run(topic.as_deref()),
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
