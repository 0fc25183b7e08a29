use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use super::deck::{Card, CardId, DECK_SIZE};

/// 开局时每位玩家的手牌数量。
pub const DEFAULT_HAND_SIZE: usize = 5;

/// 一张牌所在的区域。任意时刻每张牌只属于一个区域。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Deck,
    PlayerHand,
    OpponentHand,
    Discard,
}

/// 牌桌事件流。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum TableEvent {
    Dealt {
        player: usize,
        opponent: usize,
        deck: usize,
    },
    CardDrawn {
        card: Card,
    },
    DragStarted {
        index: usize,
        /// 被静默覆盖的上一次拖选位置。
        #[serde(skip_serializing_if = "Option::is_none")]
        replaced: Option<usize>,
    },
    DragCancelled {
        index: usize,
    },
    HandReordered {
        from: usize,
        to: usize,
    },
    CardDiscarded {
        card: Card,
    },
    CardsPlaced,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Error)]
#[serde(tag = "type")]
pub enum IntegrityError {
    #[error("expected {expected} cards on the table, found {actual}")]
    CardCountMismatch { expected: usize, actual: usize },
    #[error("card {card_id} appears in both {first:?} and {second:?}")]
    DuplicateCard {
        card_id: CardId,
        first: Zone,
        second: Zone,
    },
    #[error("drag index {index} is outside a hand of {hand_len} cards")]
    DragIndexOutOfRange { index: usize, hand_len: usize },
}

/// 牌桌整体状态：牌堆、双方手牌、弃牌堆以及正在拖动的手牌位置。
///
/// `deck` 的第一张是下一张要抽的牌，`discard` 的最后一张是展示出来的顶牌。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableState {
    #[serde(default)]
    pub deck: Vec<Card>,
    #[serde(default)]
    pub player_hand: Vec<Card>,
    #[serde(default)]
    pub opponent_hand: Vec<Card>,
    #[serde(default)]
    pub discard: Vec<Card>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drag_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub event_log: Vec<TableEvent>,
}

impl TableState {
    /// 从（已洗好的）整副牌发牌：前 `hand_size` 张给玩家，接下来 `hand_size` 张给对手，其余留作牌堆。
    pub fn deal(mut deck: Vec<Card>, hand_size: usize) -> Self {
        let player_hand: Vec<Card> = deck.drain(..hand_size.min(deck.len())).collect();
        let opponent_hand: Vec<Card> = deck.drain(..hand_size.min(deck.len())).collect();

        let mut state = Self {
            deck,
            player_hand,
            opponent_hand,
            ..Self::default()
        };
        state.record_event(TableEvent::Dealt {
            player: state.player_hand.len(),
            opponent: state.opponent_hand.len(),
            deck: state.deck.len(),
        });
        state
    }

    pub fn record_event(&mut self, event: TableEvent) {
        self.event_log.push(event);
    }

    /// 弃牌堆顶牌（唯一会被展示的一张）。
    pub fn top_discard(&self) -> Option<&Card> {
        self.discard.last()
    }

    pub fn total_cards(&self) -> usize {
        self.deck.len() + self.player_hand.len() + self.opponent_hand.len() + self.discard.len()
    }

    pub fn zones(&self) -> [(Zone, &[Card]); 4] {
        [
            (Zone::Deck, self.deck.as_slice()),
            (Zone::PlayerHand, self.player_hand.as_slice()),
            (Zone::OpponentHand, self.opponent_hand.as_slice()),
            (Zone::Discard, self.discard.as_slice()),
        ]
    }

    /// 检查 52 张牌恰好各出现一次，且拖选位置仍指向玩家手牌中的某张牌。
    pub fn integrity_check(&self) -> Result<(), IntegrityError> {
        let mut seen: HashMap<CardId, Zone> = HashMap::with_capacity(DECK_SIZE);
        for (zone, cards) in self.zones() {
            for card in cards {
                if let Some(first) = seen.insert(card.id(), zone) {
                    return Err(IntegrityError::DuplicateCard {
                        card_id: card.id(),
                        first,
                        second: zone,
                    });
                }
            }
        }

        let actual = self.total_cards();
        if actual != DECK_SIZE {
            return Err(IntegrityError::CardCountMismatch {
                expected: DECK_SIZE,
                actual,
            });
        }

        if let Some(index) = self.drag_index {
            if index >= self.player_hand.len() {
                return Err(IntegrityError::DragIndexOutOfRange {
                    index,
                    hand_len: self.player_hand.len(),
                });
            }
        }

        Ok(())
    }
}
