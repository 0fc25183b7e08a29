//! 牌桌核心逻辑模块（牌堆、状态、规则分派、控制器），不依赖 DOM。

pub mod controller;
pub mod deck;
pub mod rules;
pub mod state;
pub mod text;

pub use controller::TableController;
pub use deck::{create_deck, shuffle, Card, CardId, Rank, Suit, DECK_SIZE};
pub use rules::{notice_for, transition, RuleEngine, RuleError, RuleResolution, TableAction};
pub use state::{IntegrityError, TableEvent, TableState, Zone, DEFAULT_HAND_SIZE};
