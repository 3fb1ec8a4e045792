use serde::{Deserialize, Serialize};

use crate::domain::{PlayerName, TableId};

/// Пара игроков на раунд.
///
/// Пара неупорядоченная по смыслу, но `a`/`b` сохраняют порядок,
/// в котором их свёл движок (первым идёт тот, кто выше в лесенке).
/// В JSON пишется как `["a", "b"]`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "[PlayerName; 2]", into = "[PlayerName; 2]")]
pub struct Pairing {
    pub a: PlayerName,
    pub b: PlayerName,
}

impl Pairing {
    pub fn new(a: impl Into<PlayerName>, b: impl Into<PlayerName>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.a == name || self.b == name
    }

    /// Соперник `name` в этой паре (если `name` вообще в паре).
    pub fn opponent_of(&self, name: &str) -> Option<&str> {
        if self.a == name {
            Some(&self.b)
        } else if self.b == name {
            Some(&self.a)
        } else {
            None
        }
    }

    pub fn players(&self) -> [&str; 2] {
        [&self.a, &self.b]
    }
}

impl From<[PlayerName; 2]> for Pairing {
    fn from([a, b]: [PlayerName; 2]) -> Self {
        Self { a, b }
    }
}

impl From<Pairing> for [PlayerName; 2] {
    fn from(p: Pairing) -> Self {
        [p.a, p.b]
    }
}

/// Вынужденный повтор стола: игрок снова сел за стол, за которым уже играл,
/// потому что строгая рассадка не нашлась. Информационное сообщение, не ошибка.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForcedRepeat {
    pub player: PlayerName,
    pub table: TableId,
}
