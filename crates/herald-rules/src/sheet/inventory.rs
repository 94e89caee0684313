//! Equipment and journal notes carried on the sheet.
//!
//! Neither has any mechanical weight. Item names are unique per hunter,
//! compared without regard to case; note titles may repeat.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Character;
use crate::error::{RulesError, RulesResult};
use crate::validate::{
    ITEM_DESCRIPTION_LENGTH, ITEM_NAME_LENGTH, NOTE_CONTENT_LENGTH, NOTE_TITLE_LENGTH,
    check_length,
};

/// A piece of equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Name as entered.
    pub name: String,
    /// Optional details.
    #[serde(default)]
    pub description: Option<String>,
}

impl Item {
    /// A validated item. An empty description counts as none.
    pub fn new(name: &str, description: Option<&str>) -> RulesResult<Self> {
        let name = check_length("item name", name, &ITEM_NAME_LENGTH)?;
        let description = description
            .map(|d| check_length("item description", d, &ITEM_DESCRIPTION_LENGTH))
            .transpose()?
            .filter(|d| !d.is_empty());
        Ok(Self { name, description })
    }

    fn matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}

/// A journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Short title.
    pub title: String,
    /// Body text.
    pub content: String,
    /// When the note was written.
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// A validated note stamped with the current time.
    pub fn new(title: &str, content: &str) -> RulesResult<Self> {
        Ok(Self {
            title: check_length("note title", title, &NOTE_TITLE_LENGTH)?,
            content: check_length("note content", content, &NOTE_CONTENT_LENGTH)?,
            created_at: Utc::now(),
        })
    }

    fn matches(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.trim().to_lowercase()
    }
}

/// Check stored equipment and notes the way the add operations would.
pub(super) fn check_inventory(items: &[Item], notes: &[Note]) -> RulesResult<()> {
    for (i, item) in items.iter().enumerate() {
        Item::new(&item.name, item.description.as_deref())?;
        if items[..i].iter().any(|earlier| earlier.matches(&item.name)) {
            return Err(RulesError::conflict(format!(
                "{} is listed twice in the equipment",
                item.name
            )));
        }
    }
    for note in notes {
        check_length("note title", &note.title, &NOTE_TITLE_LENGTH)?;
        check_length("note content", &note.content, &NOTE_CONTENT_LENGTH)?;
    }
    Ok(())
}

impl Character {
    /// Equipment, alphabetically.
    pub fn items(&self) -> Vec<&Item> {
        let mut items: Vec<&Item> = self.items.iter().collect();
        items.sort_by_key(|item| item.name.to_lowercase());
        items
    }

    /// Notes, newest first.
    pub fn notes(&self) -> impl Iterator<Item = &Note> + '_ {
        self.notes.iter().rev()
    }

    /// Add a piece of equipment. Returns the item as stored.
    pub fn add_item(&mut self, name: &str, description: Option<&str>) -> RulesResult<Item> {
        let item = Item::new(name, description)?;
        if self.items.iter().any(|held| held.matches(&item.name)) {
            return Err(RulesError::conflict(format!(
                "{} is already in the equipment",
                item.name
            )));
        }
        self.items.push(item.clone());
        Ok(item)
    }

    /// Drop a piece of equipment. Returns the name as it was stored.
    pub fn remove_item(&mut self, name: &str) -> RulesResult<String> {
        let index = self
            .items
            .iter()
            .position(|item| item.matches(name))
            .ok_or_else(|| {
                RulesError::conflict(format!("{} is not in the equipment", name.trim()))
            })?;
        Ok(self.items.remove(index).name)
    }

    /// Drop all equipment. Returns how many items were removed.
    pub fn clear_items(&mut self) -> RulesResult<usize> {
        if self.items.is_empty() {
            return Err(RulesError::conflict("there is no equipment to clear"));
        }
        Ok(std::mem::take(&mut self.items).len())
    }

    /// Write a note. Returns the note as stored.
    pub fn add_note(&mut self, title: &str, content: &str) -> RulesResult<Note> {
        let note = Note::new(title, content)?;
        self.notes.push(note.clone());
        Ok(note)
    }

    /// Delete every note with this title. Returns how many were removed.
    pub fn remove_note(&mut self, title: &str) -> RulesResult<usize> {
        let before = self.notes.len();
        self.notes.retain(|note| !note.matches(title));
        match before - self.notes.len() {
            0 => Err(RulesError::conflict(format!(
                "no note titled {}",
                title.trim()
            ))),
            removed => Ok(removed),
        }
    }

    /// Delete every note. Returns how many were removed.
    pub fn clear_notes(&mut self) -> RulesResult<usize> {
        if self.notes.is_empty() {
            return Err(RulesError::conflict("there are no notes to clear"));
        }
        Ok(std::mem::take(&mut self.notes).len())
    }
}
