//! Доменная модель швейцарского турнира: ростер, пары, протокол матчей,
//! ресурсы столов (колоды/карты) и конфигурация турнира.

pub mod match_record;
pub mod pairing;
pub mod player;
pub mod resources;
pub mod tournament;

/// Имя игрока. Уникально в ростере, регистр учитывается.
pub type PlayerName = String;

/// Номер стола: 1..=num_tables.
pub type TableId = u32;

/// Номер раунда: 0 до старта, 1..=rounds после первой жеребьёвки.
pub type RoundNo = u32;

/// Ровно два игрока за столом.
pub const SEATS_PER_TABLE: usize = 2;

pub use match_record::*;
pub use pairing::*;
pub use player::*;
pub use resources::*;
pub use tournament::*;
