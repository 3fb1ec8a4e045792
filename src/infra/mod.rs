//! Инфраструктурный слой вокруг турнирного движка:
//! - RNG-реализации для движка;
//! - JSON-кодек и абстракция хранения снапшотов;
//! - маппинги между domain и API DTO.

pub mod mapping;
pub mod persistence;
pub mod rng;

pub use mapping::*;
pub use persistence::*;
pub use rng::*;
