use serde::{Deserialize, Serialize};

use crate::domain::{PlayerName, RoundNo, TableId};

/// Одна сыгранная партия. Неизменяемая запись в протоколе матчей.
///
/// Протокол (Vec<MatchRecord>) единственный источник правды для тай-брейков.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchRecord {
    pub round: RoundNo,
    pub table: TableId,
    #[serde(rename = "a")]
    pub player_a: PlayerName,
    #[serde(rename = "b")]
    pub player_b: PlayerName,
    pub winner: PlayerName,
}

impl MatchRecord {
    /// Встреча именно этих двух игроков (в любом порядке).
    pub fn is_between(&self, x: &str, y: &str) -> bool {
        (self.player_a == x && self.player_b == y) || (self.player_a == y && self.player_b == x)
    }

    pub fn loser(&self) -> &str {
        if self.winner == self.player_a {
            &self.player_b
        } else {
            &self.player_a
        }
    }

    /// Победитель действительно один из двух участников.
    pub fn is_consistent(&self) -> bool {
        self.player_a != self.player_b
            && (self.winner == self.player_a || self.winner == self.player_b)
    }
}
