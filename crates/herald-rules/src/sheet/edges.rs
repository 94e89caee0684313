//! Acquiring edges and their perks.

use super::Character;
use crate::catalog::Edge;
use crate::error::{RulesError, RulesResult};

impl Character {
    /// Acquire an edge.
    pub fn add_edge(&mut self, edge: Edge) -> RulesResult<()> {
        if !self.edges.insert(edge) {
            return Err(RulesError::conflict(format!("{edge} is already acquired")));
        }
        Ok(())
    }

    /// Give up an edge together with all of its perks. Returns the perks removed.
    pub fn remove_edge(&mut self, edge: Edge) -> RulesResult<Vec<String>> {
        if !self.edges.remove(&edge) {
            return Err(RulesError::conflict(format!("{edge} is not acquired")));
        }
        Ok(self
            .perks
            .remove(&edge)
            .map(|set| set.into_iter().collect())
            .unwrap_or_default())
    }

    /// Acquire a perk of an acquired edge. Returns its catalog spelling.
    pub fn add_perk(&mut self, edge: Edge, perk: &str) -> RulesResult<&'static str> {
        let name = edge.perk(perk).ok_or_else(|| {
            RulesError::validation("perk", format!("{} is not a perk of {edge}", perk.trim()))
        })?;
        if !self.has_edge(edge) {
            return Err(RulesError::conflict(format!(
                "acquire {edge} before taking its perks"
            )));
        }
        if !self.perks.entry(edge).or_default().insert(name.to_string()) {
            return Err(RulesError::conflict(format!("{name} is already acquired")));
        }
        Ok(name)
    }

    /// Give up a perk.
    pub fn remove_perk(&mut self, edge: Edge, perk: &str) -> RulesResult<&'static str> {
        let name = edge
            .perk(perk)
            .filter(|name| self.perks.get(&edge).is_some_and(|set| set.contains(*name)))
            .ok_or_else(|| {
                RulesError::conflict(format!("{} is not an acquired perk of {edge}", perk.trim()))
            })?;
        if let Some(set) = self.perks.get_mut(&edge) {
            set.remove(name);
            if set.is_empty() {
                self.perks.remove(&edge);
            }
        }
        Ok(name)
    }
}
