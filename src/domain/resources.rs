use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::TableId;

/// Тип раздаваемого по столам ресурса (для сообщений об ошибках).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ResourceKind {
    Deck,
    Map,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Deck => write!(f, "deck"),
            ResourceKind::Map => write!(f, "map"),
        }
    }
}

/// Колоды и карта каждого стола.
///
/// Считается один раз при старте турнира и дальше не меняется
/// (переживает все раунды, откатывается только вместе со снапшотом).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceAssignment {
    pub decks: BTreeMap<TableId, Vec<String>>,
    pub maps: BTreeMap<TableId, String>,
}

impl ResourceAssignment {
    pub fn is_empty(&self) -> bool {
        self.decks.is_empty() && self.maps.is_empty()
    }

    pub fn decks_for(&self, table: TableId) -> &[String] {
        self.decks.get(&table).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn map_for(&self, table: TableId) -> Option<&str> {
        self.maps.get(&table).map(String::as_str)
    }
}

/// Пул колод по умолчанию. Имена повторяются: за одним столом колоды
/// должны быть разные, а глобально дубликаты допустимы.
pub fn default_deck_pool() -> Vec<String> {
    [
        "Alice", "Arthur", "Medusa", "Sindbad",
        "Alice", "Arthur", "Medusa", "Sindbad",
        "Enenga", "Wukong", "Achilles", "Bloody Mary",
        "Enenga", "Wukong", "Achilles", "Bloody Mary",
        "Sherlock", "Jekyll & Hyde", "Invisible Man", "Dracula",
        "Sherlock", "Jekyll & Hyde", "Invisible Man", "Dracula",
        "Houdini", "Djinn", "Red Hood", "Beowulf",
        "Houdini", "Djinn", "Red Hood", "Beowulf",
        "Robin Hood", "Bigfoot", "Oda Nobunaga", "Tomoe Gozen",
        "Robin Hood", "Bigfoot", "Oda Nobunaga", "Tomoe Gozen",
        "Shakespeare", "Titania", "Hamlet", "Sisters",
        "Tesla", "Jill Trent", "Christmas", "Golden Bat",
        "Loki", "Pandora", "Blackbeard", "Chupacabra",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Пул карт по умолчанию: ровно по одной уникальной карте на каждый из 12 столов.
pub fn default_map_pool() -> Vec<String> {
    [
        "Baskerville Manor",
        "Globe Theatre",
        "Marmoreal",
        "Sarpedon",
        "Soho",
        "Sherwood Forest",
        "Yukon",
        "Hanging Gardens",
        "Heorot",
        "Santa's Workshop",
        "King Solomon's Mine",
        "Azuchi Castle",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
