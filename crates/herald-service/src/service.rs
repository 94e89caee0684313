//! Command operations over stored characters.
//!
//! Every mutating command runs the same cycle: take the character's lock,
//! load it, apply one rules operation, then save against the version that
//! was loaded. A failed rules check leaves the stored character untouched.
//! A version conflict reloads and reapplies the operation, up to the
//! configured retry limit.

use std::sync::Arc;

use herald_rules::{
    Adjustment, Attribute, Attributes, Character, CharacterRoll, Creed, DamageKind, DamageTrack,
    DespairState, Drive, Edge, Healing, Improvement, Item, LedgerEntry, Note, OverreachChoice,
    OverreachReport, Purchase, RollReport, RulesResult, Skill, SkillTemplate, TrackKind,
};
use tracing::{Instrument, debug, info, info_span, warn};

use crate::config::ServiceConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::locks::CharacterLocks;
use crate::store::{CharacterKey, CharacterStore, SettingsStore, StoreError, Versioned};

/// A character ready to be created.
#[derive(Debug, Clone, Default)]
pub struct NewCharacter {
    name: String,
    attributes: Attributes,
    creed: Option<Creed>,
    drive: Option<Drive>,
    ambition: String,
    desire: String,
    template: Option<SkillTemplate>,
}

impl NewCharacter {
    /// Start with all attributes at 1 and no skills.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Use these attribute ratings.
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Choose a creed.
    pub fn with_creed(mut self, creed: Creed) -> Self {
        self.creed = Some(creed);
        self
    }

    /// Choose a drive.
    pub fn with_drive(mut self, drive: Drive) -> Self {
        self.drive = Some(drive);
        self
    }

    /// Set the ambition text.
    pub fn with_ambition(mut self, text: impl Into<String>) -> Self {
        self.ambition = text.into();
        self
    }

    /// Set the desire text.
    pub fn with_desire(mut self, text: impl Into<String>) -> Self {
        self.desire = text.into();
        self
    }

    /// Spread skill dots with a template.
    pub fn with_template(mut self, template: SkillTemplate) -> Self {
        self.template = Some(template);
        self
    }

    fn build(&self, owner: &str) -> RulesResult<Character> {
        let mut character = Character::create(owner, &self.name, self.attributes)?;
        character.set_creed(self.creed);
        character.set_drive(self.drive);
        if !self.ambition.is_empty() {
            character.set_ambition(&self.ambition)?;
        }
        if !self.desire.is_empty() {
            character.set_desire(&self.desire)?;
        }
        if let Some(template) = self.template {
            character.apply_skill_template(template);
        }
        Ok(character)
    }
}

/// The result of a committed update.
#[derive(Debug, Clone)]
pub struct Updated<T> {
    /// What the rules operation returned.
    pub value: T,
    /// The character as saved.
    pub character: Character,
    /// The stored version after the save.
    pub version: u64,
}

/// An owner's characters.
#[derive(Debug, Clone)]
pub struct Roster {
    /// Normalized name of the active character, if any.
    pub active: Option<String>,
    /// Every character, ordered by name.
    pub characters: Vec<Character>,
}

impl Roster {
    /// Whether `character` is the active one.
    pub fn is_active(&self, character: &Character) -> bool {
        self.active.as_deref() == Some(CharacterKey::of(character).name.as_str())
    }
}

/// One page of a character's experience history, newest first.
#[derive(Debug, Clone)]
pub struct XpPage {
    /// Entries on this page.
    pub entries: Vec<LedgerEntry>,
    /// 1-based page number.
    pub page: usize,
    /// Total number of pages (at least 1).
    pub pages: usize,
    /// Total earned.
    pub earned: u32,
    /// Total spent.
    pub spent: u32,
}

/// Runs commands against stored characters, one at a time per character.
pub struct HeraldService {
    characters: Arc<dyn CharacterStore>,
    settings: Arc<dyn SettingsStore>,
    locks: CharacterLocks,
    config: ServiceConfig,
}

impl std::fmt::Debug for HeraldService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeraldService")
            .field("locks", &self.locks.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HeraldService {
    /// A service over one store that keeps both characters and settings.
    pub fn new<S>(store: Arc<S>, config: ServiceConfig) -> Self
    where
        S: CharacterStore + SettingsStore + 'static,
    {
        Self::with_stores(store.clone(), store, config)
    }

    /// A service over separate character and settings stores.
    pub fn with_stores(
        characters: Arc<dyn CharacterStore>,
        settings: Arc<dyn SettingsStore>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            characters,
            settings,
            locks: CharacterLocks::new(),
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// The key for `name`, or for the owner's active character when no
    /// name is given.
    pub async fn resolve_key(&self, owner: &str, name: Option<&str>) -> ServiceResult<CharacterKey> {
        if let Some(name) = name {
            return Ok(CharacterKey::new(owner, name));
        }
        match self.settings.active(owner).await? {
            Some(active) => Ok(CharacterKey::new(owner, &active)),
            None => Err(ServiceError::NoActiveCharacter),
        }
    }

    // --- lifecycle ---

    /// Create a character and make it active.
    pub async fn create(&self, owner: &str, new: NewCharacter) -> ServiceResult<Character> {
        let character = new.build(owner)?;
        let key = CharacterKey::of(&character);
        let _guard = self.locks.acquire(&key, self.config.lock_timeout).await?;
        self.characters.save(&character, None).await?;
        self.settings.set_active(owner, &key.name).await?;
        info!(owner, character = %key.name, "character created");
        Ok(character)
    }

    /// Delete a character. The owner's active pointer is cleared if it
    /// named this character.
    pub async fn delete(&self, owner: &str, name: &str) -> ServiceResult<()> {
        let key = CharacterKey::new(owner, name);
        let guard = self.locks.acquire(&key, self.config.lock_timeout).await?;
        self.characters.delete(&key).await?;
        if self.settings.active(owner).await?.as_deref() == Some(key.name.as_str()) {
            self.settings.clear_active(owner).await?;
        }
        drop(guard);
        self.locks.forget(&key);
        info!(owner, character = %key.name, "character deleted");
        Ok(())
    }

    /// Make an existing character the owner's active one.
    pub async fn switch(&self, owner: &str, name: &str) -> ServiceResult<Character> {
        let key = CharacterKey::new(owner, name);
        let Versioned { character, .. } = self.characters.load(&key).await?;
        self.settings.set_active(owner, &key.name).await?;
        debug!(owner, character = %key.name, "active character switched");
        Ok(character)
    }

    /// All of an owner's characters and which one is active.
    pub async fn list(&self, owner: &str) -> ServiceResult<Roster> {
        Ok(Roster {
            active: self.settings.active(owner).await?,
            characters: self.characters.list(owner).await?,
        })
    }

    /// Read a character without locking it.
    pub async fn sheet(&self, owner: &str, name: Option<&str>) -> ServiceResult<Character> {
        let key = self.resolve_key(owner, name).await?;
        Ok(self.characters.load(&key).await?.character)
    }

    /// A page of experience history.
    pub async fn xp_log(&self, owner: &str, name: Option<&str>, page: usize) -> ServiceResult<XpPage> {
        let character = self.sheet(owner, name).await?;
        let ledger = character.experience();
        let page = page.max(1);
        Ok(XpPage {
            entries: ledger.page(page).into_iter().cloned().collect(),
            page,
            pages: ledger.page_count(),
            earned: ledger.earned(),
            spent: ledger.spent(),
        })
    }

    /// Apply `f` to one character under its lock and save the result.
    pub async fn update<T, F>(
        &self,
        owner: &str,
        name: Option<&str>,
        op: &'static str,
        mut f: F,
    ) -> ServiceResult<Updated<T>>
    where
        F: FnMut(&mut Character) -> RulesResult<T> + Send,
        T: Send,
    {
        let key = self.resolve_key(owner, name).await?;
        let span = info_span!("update", op, owner, character = %key.name);
        async {
            let _guard = self.locks.acquire(&key, self.config.lock_timeout).await?;
            debug!("lock acquired");
            let attempts = self.config.max_conflict_retries + 1;
            for attempt in 1..=attempts {
                let Versioned {
                    version,
                    mut character,
                } = self.characters.load(&key).await?;
                let value = f(&mut character)?;
                character.touch();
                match self.characters.save(&character, Some(version)).await {
                    Ok(version) => {
                        info!(version, "character saved");
                        return Ok(Updated {
                            value,
                            character,
                            version,
                        });
                    }
                    Err(StoreError::Conflict { expected, found, .. }) => {
                        debug!(attempt, expected, found, "version conflict, reloading");
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            warn!(attempts, "giving up after repeated version conflicts");
            Err(ServiceError::Conflict {
                name: key.name.clone(),
                attempts,
            })
        }
        .instrument(span)
        .await
    }

    // --- dice and despair ---

    /// Roll for a character.
    pub async fn roll(
        &self,
        owner: &str,
        name: Option<&str>,
        request: CharacterRoll,
    ) -> ServiceResult<Updated<RollReport>> {
        self.update(owner, name, "roll", |c| c.roll(&request)).await
    }

    /// Settle a pending overreach decision.
    pub async fn resolve_overreach(
        &self,
        owner: &str,
        name: Option<&str>,
        choice: OverreachChoice,
    ) -> ServiceResult<Updated<OverreachReport>> {
        self.update(owner, name, "overreach", |c| c.resolve_overreach(choice))
            .await
    }

    /// Fall into despair.
    pub async fn enter_despair(&self, owner: &str, name: Option<&str>) -> ServiceResult<Updated<DespairState>> {
        self.update(owner, name, "despair", Character::enter_despair).await
    }

    /// Climb out of despair by fulfilling the drive's redemption.
    pub async fn redeem(&self, owner: &str, name: Option<&str>) -> ServiceResult<Updated<DespairState>> {
        self.update(owner, name, "redeem", Character::exit_redemption).await
    }

    /// Change desperation.
    pub async fn adjust_desperation(
        &self,
        owner: &str,
        name: Option<&str>,
        change: Adjustment,
    ) -> ServiceResult<Updated<u8>> {
        self.update(owner, name, "desperation", |c| c.adjust_desperation(change))
            .await
    }

    /// Change danger.
    pub async fn adjust_danger(
        &self,
        owner: &str,
        name: Option<&str>,
        change: Adjustment,
    ) -> ServiceResult<Updated<u8>> {
        self.update(owner, name, "danger", |c| c.adjust_danger(change)).await
    }

    // --- tracks ---

    /// Mark damage on a track.
    pub async fn damage(
        &self,
        owner: &str,
        name: Option<&str>,
        track: TrackKind,
        kind: DamageKind,
        amount: u32,
    ) -> ServiceResult<Updated<DamageTrack>> {
        self.update(owner, name, "damage", |c| {
            Ok(c.apply_damage(track, kind, amount))
        })
        .await
    }

    /// Heal a track.
    pub async fn heal(
        &self,
        owner: &str,
        name: Option<&str>,
        track: TrackKind,
        healing: Healing,
    ) -> ServiceResult<Updated<DamageTrack>> {
        self.update(owner, name, "heal", |c| Ok(c.heal(track, healing))).await
    }

    // --- hunter identity ---

    /// Set or clear the creed. Returns the previous one.
    pub async fn set_creed(
        &self,
        owner: &str,
        name: Option<&str>,
        creed: Option<Creed>,
    ) -> ServiceResult<Updated<Option<Creed>>> {
        self.update(owner, name, "creed", |c| Ok(c.set_creed(creed))).await
    }

    /// Set or clear the drive. Returns the previous one.
    pub async fn set_drive(
        &self,
        owner: &str,
        name: Option<&str>,
        drive: Option<Drive>,
    ) -> ServiceResult<Updated<Option<Drive>>> {
        self.update(owner, name, "drive", |c| Ok(c.set_drive(drive))).await
    }

    /// Set the ambition text.
    pub async fn set_ambition(&self, owner: &str, name: Option<&str>, text: &str) -> ServiceResult<Updated<()>> {
        self.update(owner, name, "ambition", |c| c.set_ambition(text)).await
    }

    /// Set the desire text.
    pub async fn set_desire(&self, owner: &str, name: Option<&str>, text: &str) -> ServiceResult<Updated<()>> {
        self.update(owner, name, "desire", |c| c.set_desire(text)).await
    }

    // --- ratings ---

    /// Set an attribute directly. Returns the old rating.
    pub async fn set_attribute(
        &self,
        owner: &str,
        name: Option<&str>,
        attr: Attribute,
        rating: u8,
    ) -> ServiceResult<Updated<u8>> {
        self.update(owner, name, "set_attribute", |c| c.set_attribute(attr, rating))
            .await
    }

    /// Set a skill directly. Returns the old rating.
    pub async fn set_skill(
        &self,
        owner: &str,
        name: Option<&str>,
        skill: Skill,
        rating: u8,
    ) -> ServiceResult<Updated<u8>> {
        self.update(owner, name, "set_skill", |c| c.set_skill(skill, rating))
            .await
    }

    /// Overwrite all skills from a template. Returns specialties that no
    /// longer fit.
    pub async fn apply_template(
        &self,
        owner: &str,
        name: Option<&str>,
        template: SkillTemplate,
    ) -> ServiceResult<Updated<Vec<(Skill, String)>>> {
        self.update(owner, name, "template", |c| Ok(c.apply_skill_template(template)))
            .await
    }

    /// Add a specialty without paying for it.
    pub async fn add_specialty(
        &self,
        owner: &str,
        name: Option<&str>,
        skill: Skill,
        specialty: &str,
    ) -> ServiceResult<Updated<()>> {
        self.update(owner, name, "add_specialty", |c| c.add_specialty(skill, specialty))
            .await
    }

    /// Remove a specialty. Returns its stored spelling.
    pub async fn remove_specialty(
        &self,
        owner: &str,
        name: Option<&str>,
        skill: Skill,
        specialty: &str,
    ) -> ServiceResult<Updated<String>> {
        self.update(owner, name, "remove_specialty", |c| {
            c.remove_specialty(skill, specialty)
        })
        .await
    }

    // --- experience ---

    /// Award experience. Returns the experience now available.
    pub async fn earn_xp(
        &self,
        owner: &str,
        name: Option<&str>,
        amount: u32,
        reason: &str,
    ) -> ServiceResult<Updated<u32>> {
        self.update(owner, name, "earn_xp", |c| c.earn_experience(amount, reason))
            .await
    }

    /// Spend experience outside a purchase. Returns the experience now available.
    pub async fn spend_xp(
        &self,
        owner: &str,
        name: Option<&str>,
        amount: u32,
        reason: &str,
    ) -> ServiceResult<Updated<u32>> {
        self.update(owner, name, "spend_xp", |c| c.spend_experience(amount, reason))
            .await
    }

    /// Correct the experience totals.
    pub async fn set_xp(
        &self,
        owner: &str,
        name: Option<&str>,
        earned: Option<u32>,
        spent: Option<u32>,
        reason: &str,
    ) -> ServiceResult<Updated<()>> {
        self.update(owner, name, "set_xp", |c| c.set_experience(earned, spent, reason))
            .await
    }

    /// Buy an improvement with experience.
    pub async fn purchase(
        &self,
        owner: &str,
        name: Option<&str>,
        improvement: Improvement,
    ) -> ServiceResult<Updated<Purchase>> {
        self.update(owner, name, "purchase", |c| c.purchase(improvement.clone()))
            .await
    }

    // --- edges ---

    /// Acquire an edge.
    pub async fn add_edge(&self, owner: &str, name: Option<&str>, edge: Edge) -> ServiceResult<Updated<()>> {
        self.update(owner, name, "add_edge", |c| c.add_edge(edge)).await
    }

    /// Give up an edge and its perks. Returns the perks removed.
    pub async fn remove_edge(
        &self,
        owner: &str,
        name: Option<&str>,
        edge: Edge,
    ) -> ServiceResult<Updated<Vec<String>>> {
        self.update(owner, name, "remove_edge", |c| c.remove_edge(edge)).await
    }

    /// Acquire a perk. Returns its catalog spelling.
    pub async fn add_perk(
        &self,
        owner: &str,
        name: Option<&str>,
        edge: Edge,
        perk: &str,
    ) -> ServiceResult<Updated<&'static str>> {
        self.update(owner, name, "add_perk", |c| c.add_perk(edge, perk)).await
    }

    /// Give up a perk. Returns its catalog spelling.
    pub async fn remove_perk(
        &self,
        owner: &str,
        name: Option<&str>,
        edge: Edge,
        perk: &str,
    ) -> ServiceResult<Updated<&'static str>> {
        self.update(owner, name, "remove_perk", |c| c.remove_perk(edge, perk))
            .await
    }

    // --- equipment and notes ---

    /// Add a piece of equipment.
    pub async fn add_item(
        &self,
        owner: &str,
        name: Option<&str>,
        item: &str,
        description: Option<&str>,
    ) -> ServiceResult<Updated<Item>> {
        self.update(owner, name, "add_item", |c| c.add_item(item, description))
            .await
    }

    /// Drop a piece of equipment. Returns its stored name.
    pub async fn remove_item(
        &self,
        owner: &str,
        name: Option<&str>,
        item: &str,
    ) -> ServiceResult<Updated<String>> {
        self.update(owner, name, "remove_item", |c| c.remove_item(item)).await
    }

    /// Drop all equipment. Returns how many items went.
    pub async fn clear_items(&self, owner: &str, name: Option<&str>) -> ServiceResult<Updated<usize>> {
        self.update(owner, name, "clear_items", Character::clear_items).await
    }

    /// Write a note.
    pub async fn add_note(
        &self,
        owner: &str,
        name: Option<&str>,
        title: &str,
        content: &str,
    ) -> ServiceResult<Updated<Note>> {
        self.update(owner, name, "add_note", |c| c.add_note(title, content))
            .await
    }

    /// Delete notes by title. Returns how many went.
    pub async fn remove_note(
        &self,
        owner: &str,
        name: Option<&str>,
        title: &str,
    ) -> ServiceResult<Updated<usize>> {
        self.update(owner, name, "remove_note", |c| c.remove_note(title)).await
    }

    /// Delete every note.
    pub async fn clear_notes(&self, owner: &str, name: Option<&str>) -> ServiceResult<Updated<usize>> {
        self.update(owner, name, "clear_notes", Character::clear_notes).await
    }
}
