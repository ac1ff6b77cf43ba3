//! Persistent economy: high score, coin balance and owned characters
//!
//! One `EconomyStore` owns all of it and is threaded through the state
//! machine; every mutation goes through here.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistError};
use crate::sim::CharacterKind;

/// The persisted part of the economy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomyState {
    pub high_score: u64,
    pub coins: u64,
    /// Always contains `CharacterKind::Default`
    pub owned: BTreeSet<CharacterKind>,
}

impl Default for EconomyState {
    fn default() -> Self {
        Self {
            high_score: 0,
            coins: 0,
            owned: BTreeSet::from([CharacterKind::Default]),
        }
    }
}

/// Rejected shop actions. None of these mutate state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EconomyError {
    #[error("{} is already owned", .0.display_name())]
    AlreadyOwned(CharacterKind),
    #[error("not enough coins: costs {cost}, have {balance}")]
    InsufficientCoins { cost: u64, balance: u64 },
    #[error("{} is not owned", .0.display_name())]
    NotOwned(CharacterKind),
}

/// Result of banking a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub score: u64,
    pub coins_collected: u64,
    /// Balance after the run's coins were added
    pub total_coins: u64,
    pub new_high_score: bool,
}

/// Owner of the economy state and its backing file
#[derive(Debug, Clone)]
pub struct EconomyStore {
    state: EconomyState,
    /// Active selection, not persisted
    equipped: CharacterKind,
    /// Backing record; `None` keeps everything in memory
    path: Option<PathBuf>,
}

impl EconomyStore {
    /// Load from the record at `path` (defaults if missing or malformed)
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = persistence::load(&path);
        log::info!(
            "Economy loaded: high score {}, {} coins, {} characters owned",
            state.high_score,
            state.coins,
            state.owned.len()
        );
        Self {
            state,
            equipped: CharacterKind::Default,
            path: Some(path),
        }
    }

    /// Store that never touches disk
    pub fn in_memory(mut state: EconomyState) -> Self {
        state.owned.insert(CharacterKind::Default);
        Self {
            state,
            equipped: CharacterKind::Default,
            path: None,
        }
    }

    pub fn state(&self) -> &EconomyState {
        &self.state
    }

    pub fn high_score(&self) -> u64 {
        self.state.high_score
    }

    pub fn coins(&self) -> u64 {
        self.state.coins
    }

    pub fn owns(&self, kind: CharacterKind) -> bool {
        self.state.owned.contains(&kind)
    }

    pub fn equipped(&self) -> CharacterKind {
        self.equipped
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write the complete current state over the record
    pub fn save(&self) -> Result<(), PersistError> {
        match &self.path {
            Some(path) => persistence::save(path, &self.state),
            None => Ok(()),
        }
    }

    /// Save, degrading to a warning if the medium is unavailable.
    /// Returns whether the state reached disk.
    pub fn flush(&self) -> bool {
        match self.save() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Could not save economy, continuing without persistence: {}", e);
                false
            }
        }
    }

    /// Buy a character: debit and grant together, or neither
    pub fn purchase(&mut self, kind: CharacterKind) -> Result<(), EconomyError> {
        if self.owns(kind) {
            return Err(EconomyError::AlreadyOwned(kind));
        }
        let cost = kind.cost();
        let balance = self.state.coins;
        let remaining = balance
            .checked_sub(cost)
            .ok_or(EconomyError::InsufficientCoins { cost, balance })?;

        self.state.coins = remaining;
        self.state.owned.insert(kind);
        log::info!("Purchased {} for {} coins ({} left)", kind.display_name(), cost, remaining);
        Ok(())
    }

    /// Select an owned character for the next run
    pub fn equip(&mut self, kind: CharacterKind) -> Result<(), EconomyError> {
        if !self.owns(kind) {
            return Err(EconomyError::NotOwned(kind));
        }
        self.equipped = kind;
        log::info!("Equipped {}", kind.display_name());
        Ok(())
    }

    /// Check if a score would beat the stored high score
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.state.high_score
    }

    /// Bank a finished run: raise the high score if beaten and add the coins
    pub fn record_run(&mut self, score: u64, coins_collected: u64) -> RunResult {
        let new_high_score = self.qualifies(score);
        if new_high_score {
            self.state.high_score = score;
        }
        self.state.coins = self.state.coins.saturating_add(coins_collected);

        RunResult {
            score,
            coins_collected,
            total_coins: self.state.coins,
            new_high_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with_coins(coins: u64) -> EconomyStore {
        EconomyStore::in_memory(EconomyState {
            coins,
            ..EconomyState::default()
        })
    }

    #[test]
    fn test_purchase_debits_and_grants() {
        let mut store = store_with_coins(150);
        store.purchase(CharacterKind::Ninja).unwrap();
        assert_eq!(store.coins(), 50);
        assert!(store.owns(CharacterKind::Ninja));
    }

    #[test]
    fn test_purchase_insufficient_coins_is_atomic() {
        let mut store = store_with_coins(99);
        let before = store.state().clone();

        assert_eq!(
            store.purchase(CharacterKind::Ninja),
            Err(EconomyError::InsufficientCoins {
                cost: 100,
                balance: 99
            })
        );
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_purchase_already_owned_rejected() {
        let mut store = store_with_coins(1000);
        assert_eq!(
            store.purchase(CharacterKind::Default),
            Err(EconomyError::AlreadyOwned(CharacterKind::Default))
        );
        assert_eq!(store.coins(), 1000);
    }

    #[test]
    fn test_equip_requires_ownership() {
        let mut store = store_with_coins(500);
        assert_eq!(
            store.equip(CharacterKind::Alien),
            Err(EconomyError::NotOwned(CharacterKind::Alien))
        );
        assert_eq!(store.equipped(), CharacterKind::Default);

        store.purchase(CharacterKind::Alien).unwrap();
        store.equip(CharacterKind::Alien).unwrap();
        assert_eq!(store.equipped(), CharacterKind::Alien);
        assert_eq!(store.coins(), 200);
    }

    #[test]
    fn test_record_run() {
        let mut store = EconomyStore::in_memory(EconomyState {
            high_score: 50,
            coins: 20,
            ..EconomyState::default()
        });

        let result = store.record_run(40, 5);
        assert!(!result.new_high_score);
        assert_eq!(store.high_score(), 50);
        assert_eq!(result.total_coins, 25);

        // Ties do not count
        assert!(!store.record_run(50, 0).new_high_score);

        let result = store.record_run(60, 10);
        assert!(result.new_high_score);
        assert_eq!(store.high_score(), 60);
        assert_eq!(store.coins(), 35);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gamedata.txt");

        let mut store = EconomyStore::load(&path);
        assert_eq!(store.state(), &EconomyState::default());

        store.record_run(120, 400);
        store.purchase(CharacterKind::Superhero).unwrap();
        assert!(store.flush());

        let reloaded = EconomyStore::load(&path);
        assert_eq!(reloaded.state(), store.state());
        assert_eq!(reloaded.coins(), 0);
    }

    #[test]
    fn test_flush_failure_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        // A directory where the record should be makes the rename fail
        let path = dir.path().join("gamedata.txt");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("occupied"), "x").unwrap();

        let store = EconomyStore::load(&path);
        assert!(!store.flush());
        assert_eq!(store.state(), &EconomyState::default());
    }
}
