//! Manual catalog types.
//!
//! A manual is a named historical game record made of one or more named
//! variations, each an ordered move list. The catalog is read-only once
//! loaded; the built-in one is embedded from `data/manuals.json`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::transfer::ManualError;
use crate::board::Square;

const BUILTIN_JSON: &str = include_str!("../../data/manuals.json");

/// One recorded move.
///
/// `piece` is the glyph expected at `from` when the move is applied. Replay
/// moves whatever is actually on the source square; `piece` is kept for
/// display and for consistency checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    #[serde(rename = "move")]
    pub label: String,
    pub from: Square,
    pub to: Square,
    pub piece: char,
}

impl Move {
    pub fn new(label: impl Into<String>, from: Square, to: Square, piece: char) -> Self {
        Move {
            label: label.into(),
            from,
            to,
            piece,
        }
    }

    /// Returns true if both endpoints lie on the board.
    pub fn is_in_bounds(&self) -> bool {
        self.from.is_valid() && self.to.is_valid()
    }
}

/// A named move sequence within a manual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    pub name: String,
    #[serde(default)]
    pub moves: Vec<Move>,
}

/// A named game record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manual {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub variations: Vec<Variation>,
}

impl Manual {
    /// Looks up a variation by exact name or by 1-based position.
    pub fn variation(&self, key: &str) -> Option<&Variation> {
        lookup(&self.variations, key, |v| v.name.as_str())
    }

    /// Returns the total number of moves across all variations.
    pub fn move_count(&self) -> usize {
        self.variations.iter().map(|v| v.moves.len()).sum()
    }
}

/// The set of manuals available to the viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub manuals: Vec<Manual>,
}

impl Catalog {
    /// Parses the catalog shipped with the crate.
    pub fn builtin() -> Result<Catalog, ManualError> {
        Catalog::from_json(BUILTIN_JSON)
    }

    /// Parses a catalog document: `{ "manuals": [...] }`.
    pub fn from_json(json: &str) -> Result<Catalog, ManualError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a catalog document from disk.
    pub fn load(path: &Path) -> Result<Catalog, ManualError> {
        let data = std::fs::read_to_string(path)?;
        Catalog::from_json(&data)
    }

    /// Looks up a manual by exact name or by 1-based position.
    pub fn find(&self, key: &str) -> Option<&Manual> {
        lookup(&self.manuals, key, |m| m.name.as_str())
    }

    /// Looks up a variation inside a manual. An empty variation key selects
    /// the first variation.
    pub fn variation(&self, manual: &str, variation: &str) -> Option<&Variation> {
        let manual = self.find(manual)?;
        if variation.is_empty() {
            manual.variations.first()
        } else {
            manual.variation(variation)
        }
    }

    /// Adds a manual, replacing any existing manual with the same name.
    pub fn insert(&mut self, manual: Manual) {
        match self.manuals.iter_mut().find(|m| m.name == manual.name) {
            Some(existing) => *existing = manual,
            None => self.manuals.push(manual),
        }
    }
}

fn lookup<'a, T>(items: &'a [T], key: &str, name: impl Fn(&T) -> &str) -> Option<&'a T> {
    if let Some(item) = items.iter().find(|item| name(*item) == key) {
        return Some(item);
    }
    match key.parse::<usize>() {
        Ok(n) if n >= 1 => items.get(n - 1),
        _ => None,
    }
}
