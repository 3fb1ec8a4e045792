use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::PlayerName;

/// Ошибки редактирования ростера.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("Player name is empty")]
    EmptyName,

    #[error("Player {name} is already registered")]
    DuplicateName { name: PlayerName },

    #[error("Roster is full: capacity={capacity}")]
    CapacityExceeded { capacity: usize },

    #[error("Roster cannot be edited after the tournament has started")]
    EditAfterStart,

    #[error("Player {name} is not in the roster")]
    UnknownPlayer { name: PlayerName },

    #[error("Add players first")]
    EmptyRoster,

    #[error("Number of players must be even (2 per table), got {count}")]
    OddCount { count: usize },
}

/// Упорядоченный список игроков турнира.
///
/// Порядок добавления сохраняется (он же порядок в сохранённом снапшоте).
/// После старта турнира ростер не меняется; это контролирует `TournamentRuntime`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Roster {
    players: Vec<PlayerName>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Собрать ростер из готового списка (загрузка снапшота).
    /// Дубликаты отклоняются.
    pub fn from_names(names: Vec<PlayerName>) -> Result<Self, RosterError> {
        let mut roster = Self::new();
        for name in names {
            roster.add(name, usize::MAX)?;
        }
        Ok(roster)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.players.iter().any(|p| p == name)
    }

    pub fn names(&self) -> &[PlayerName] {
        &self.players
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerName> {
        self.players.iter()
    }

    /// Добавить игрока в конец ростера.
    pub fn add(&mut self, name: impl Into<PlayerName>, capacity: usize) -> Result<(), RosterError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RosterError::EmptyName);
        }
        if self.contains(&name) {
            return Err(RosterError::DuplicateName { name });
        }
        if self.players.len() >= capacity {
            return Err(RosterError::CapacityExceeded { capacity });
        }
        self.players.push(name);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Result<(), RosterError> {
        let pos = self
            .players
            .iter()
            .position(|p| p == name)
            .ok_or_else(|| RosterError::UnknownPlayer {
                name: name.to_string(),
            })?;
        self.players.remove(pos);
        Ok(())
    }

    /// Проверка перед стартом: ростер не пуст, чётный и влезает в столы.
    pub fn validate_for_start(&self, capacity: usize) -> Result<(), RosterError> {
        if self.players.is_empty() {
            return Err(RosterError::EmptyRoster);
        }
        if self.players.len() % 2 == 1 {
            return Err(RosterError::OddCount {
                count: self.players.len(),
            });
        }
        if self.players.len() > capacity {
            return Err(RosterError::CapacityExceeded { capacity });
        }
        Ok(())
    }
}
