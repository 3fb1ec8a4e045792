// src/engine/dealer.rs

use std::collections::{BTreeMap, HashSet};

use crate::domain::{ResourceKind, TableId};
use crate::engine::{EngineError, RandomSource};

/// Раздать колоды по столам. Вызывается один раз при старте турнира.
///
/// Правила:
///   - каждому столу ровно `per_table` колод;
///   - за одним столом колоды попарно различны;
///   - глобально пул может содержать дубликаты.
///
/// Алгоритм: перемешиваем весь пул, дальше для каждого стола идём
/// курсором вперёд, ищем ближайшую колоду, которой ещё нет за этим столом,
/// ставим её на позицию курсора и забираем.
pub fn deal_decks<R: RandomSource>(
    pool: &[String],
    num_tables: u32,
    per_table: usize,
    rng: &mut R,
) -> Result<BTreeMap<TableId, Vec<String>>, EngineError> {
    let needed = num_tables as usize * per_table;
    if pool.len() < needed {
        return Err(EngineError::InsufficientPool {
            kind: ResourceKind::Deck,
            needed,
            available: pool.len(),
        });
    }

    let mut pool = pool.to_vec();
    rng.shuffle(&mut pool);

    let mut out: BTreeMap<TableId, Vec<String>> = BTreeMap::new();
    let mut cursor = 0usize;

    for table in 1..=num_tables {
        let mut used_here: HashSet<String> = HashSet::with_capacity(per_table);
        let mut decks = Vec::with_capacity(per_table);

        for _ in 0..per_table {
            let pick = (cursor..pool.len())
                .find(|&j| !used_here.contains(&pool[j]))
                .ok_or(EngineError::NoDistinctItem {
                    kind: ResourceKind::Deck,
                    table,
                })?;

            pool.swap(cursor, pick);
            let chosen = pool[cursor].clone();
            cursor += 1;

            used_here.insert(chosen.clone());
            decks.push(chosen);
        }

        out.insert(table, decks);
    }

    Ok(out)
}

/// Раздать по одной карте на стол. Карты не повторяются глобально,
/// поэтому достаточно одного перемешивания и среза.
///
/// Повторяющиеся имена в пуле схлопываются: если уникальных карт
/// меньше, чем столов, раздача отклоняется.
pub fn deal_maps<R: RandomSource>(
    pool: &[String],
    num_tables: u32,
    rng: &mut R,
) -> Result<BTreeMap<TableId, String>, EngineError> {
    let needed = num_tables as usize;

    let mut unique: Vec<String> = Vec::with_capacity(pool.len());
    for m in pool {
        if !unique.contains(m) {
            unique.push(m.clone());
        }
    }

    if unique.len() < needed {
        return Err(EngineError::InsufficientPool {
            kind: ResourceKind::Map,
            needed,
            available: unique.len(),
        });
    }

    rng.shuffle(&mut unique);

    Ok((1..=num_tables)
        .zip(unique)
        .collect())
}
