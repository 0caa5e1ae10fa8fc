pub mod dto;

pub use dto::{KpiScore, StoreScorecard};
