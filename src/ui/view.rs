//! 纯展示层：把牌桌状态换算成各视图需要的文字、颜色和内联样式，不持有任何状态。

use crate::game::{text, Card, CardId, TableAction, TableState};

const FACE_UP_BACKGROUND: &str = "white";
const FACE_DOWN_BACKGROUND: &str = "#444";
const RED_INK: &str = "red";
const BLACK_INK: &str = "black";

pub const ROOT_STYLE: &str = "width:600px;height:600px;background-color:#388e3c;border-radius:15px;\
padding:20px;display:flex;flex-direction:column;justify-content:space-between;user-select:none;";
pub const PLAYER_HAND_STYLE: &str = "display:flex;padding:10px;background-color:#1b5e20;\
border-radius:10px;min-height:110px;user-select:none;overflow-x:auto;";
pub const OPPONENT_HAND_STYLE: &str = "display:flex;padding:10px;background-color:#1b5e20;\
border-radius:10px;min-height:110px;user-select:none;overflow-x:auto;justify-content:center;\
margin-bottom:20px;";
pub const PILES_ROW_STYLE: &str =
    "display:flex;justify-content:space-around;align-items:center;margin-bottom:10px;";
pub const BUTTON_ROW_STYLE: &str = "display:flex;justify-content:center;gap:20px;margin-top:15px;";

/// 单张牌的展示属性。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: CardId,
    /// 背面朝上时为空。
    pub label: Option<String>,
    pub ink: &'static str,
    pub draggable: bool,
    /// 可拖动的牌同时是拖动源和放置目标，两者都暴露自己在手牌中的位置。
    pub index: Option<usize>,
}

impl CardView {
    /// 只有带手牌位置的牌才可拖动，保证每个拖动源也是放置目标。
    fn new(card: &Card, face_up: bool, index: Option<usize>) -> Self {
        Self {
            id: card.id(),
            label: face_up.then(|| card.label()),
            ink: if card.suit.is_red() { RED_INK } else { BLACK_INK },
            draggable: index.is_some(),
            index,
        }
    }

    pub fn face_up(&self) -> bool {
        self.label.is_some()
    }

    pub fn style(&self) -> String {
        let background = if self.face_up() {
            FACE_UP_BACKGROUND
        } else {
            FACE_DOWN_BACKGROUND
        };
        let cursor = if self.draggable { "grab" } else { "default" };
        format!(
            "width:60px;height:90px;border-radius:8px;border:1px solid #ccc;\
             background-color:{background};color:{ink};font-size:24px;font-weight:bold;\
             display:flex;justify-content:center;align-items:center;margin-right:5px;\
             user-select:none;cursor:{cursor};",
            ink = self.ink,
        )
    }
}

/// 玩家手牌：从左到右正面朝上，每张都可拖动。
pub fn player_hand(hand: &[Card]) -> Vec<CardView> {
    hand.iter()
        .enumerate()
        .map(|(index, card)| CardView::new(card, true, Some(index)))
        .collect()
}

/// 对手手牌：全部背面朝上，不可交互。
pub fn opponent_hand(hand: &[Card]) -> Vec<CardView> {
    hand.iter()
        .map(|card| CardView::new(card, false, None))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PileView {
    pub label: String,
    background: &'static str,
}

impl PileView {
    pub fn style(&self) -> String {
        format!(
            "width:70px;height:100px;border-radius:8px;background-color:{};border:2px solid white;\
             display:flex;justify-content:center;align-items:center;text-align:center;\
             white-space:pre-line;color:white;font-weight:bold;user-select:none;margin-bottom:10px;",
            self.background
        )
    }
}

pub fn deck_pile(count: usize) -> PileView {
    PileView {
        label: text::deck_label(count),
        background: "#2e7d32",
    }
}

pub fn discard_pile(top: Option<&Card>) -> PileView {
    PileView {
        label: top
            .map(Card::label)
            .unwrap_or_else(|| text::DISCARD_PLACEHOLDER.to_string()),
        background: "#4caf50",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonView {
    /// 写入 `data-action` 属性的名字。
    pub action: &'static str,
    pub label: &'static str,
}

pub const BUTTONS: [ButtonView; 3] = [
    ButtonView {
        action: "draw",
        label: text::DRAW_BUTTON,
    },
    ButtonView {
        action: "discard",
        label: text::DISCARD_BUTTON,
    },
    ButtonView {
        action: "place",
        label: text::PLACE_BUTTON,
    },
];

pub fn button_action(name: &str) -> Option<TableAction> {
    match name {
        "draw" => Some(TableAction::Draw),
        "discard" => Some(TableAction::Discard),
        "place" => Some(TableAction::Place),
        _ => None,
    }
}

/// 一次完整渲染所需的全部展示数据。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub opponent: Vec<CardView>,
    pub deck: PileView,
    pub discard: PileView,
    pub player: Vec<CardView>,
}

impl TableView {
    pub fn from_state(state: &TableState) -> Self {
        Self {
            opponent: opponent_hand(&state.opponent_hand),
            deck: deck_pile(state.deck.len()),
            discard: discard_pile(state.top_discard()),
            player: player_hand(&state.player_hand),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{create_deck, Rank, Suit, DEFAULT_HAND_SIZE};

    #[test]
    fn face_up_card_shows_label_and_suit_colour() {
        let view = CardView::new(&Card::new(Suit::Diamonds, Rank::Queen), true, None);
        assert_eq!(view.label.as_deref(), Some("Q♦"));
        assert_eq!(view.ink, "red");
        assert!(view.style().contains("background-color:white"));
        assert!(view.style().contains("cursor:default"));

        let black = CardView::new(&Card::new(Suit::Spades, Rank::Two), true, None);
        assert_eq!(black.ink, "black");
    }

    #[test]
    fn face_down_card_hides_value() {
        let view = CardView::new(&Card::new(Suit::Hearts, Rank::Ace), false, None);
        assert!(!view.face_up());
        assert_eq!(view.label, None);
        assert!(view.style().contains("background-color:#444"));
    }

    #[test]
    fn player_hand_exposes_indices() {
        let hand: Vec<Card> = create_deck().into_iter().take(3).collect();
        let views = player_hand(&hand);
        assert_eq!(
            views.iter().map(|view| view.index).collect::<Vec<_>>(),
            vec![Some(0), Some(1), Some(2)]
        );
        assert!(views.iter().all(|view| view.draggable && view.face_up()));
        assert!(views[0].style().contains("cursor:grab"));
    }

    #[test]
    fn draggable_cards_are_always_drop_targets() {
        let hand: Vec<Card> = create_deck().into_iter().take(4).collect();
        for view in player_hand(&hand).iter().chain(opponent_hand(&hand).iter()) {
            assert_eq!(view.draggable, view.index.is_some());
        }

        let loose = CardView::new(&hand[0], true, None);
        assert!(!loose.draggable, "a card without a hand position cannot be dragged");
    }

    #[test]
    fn opponent_hand_is_inert() {
        let hand: Vec<Card> = create_deck().into_iter().take(5).collect();
        let views = opponent_hand(&hand);
        assert_eq!(views.len(), 5);
        assert!(views
            .iter()
            .all(|view| !view.draggable && !view.face_up() && view.index.is_none()));
    }

    #[test]
    fn piles_show_count_and_top_card() {
        assert_eq!(deck_pile(42).label, "الرزمة\n42 ورقة");
        assert_eq!(discard_pile(None).label, "البحر");

        let top = Card::new(Suit::Hearts, Rank::Ten);
        assert_eq!(discard_pile(Some(&top)).label, "10♥");
        assert!(deck_pile(0).style().contains("white-space:pre-line"));
    }

    #[test]
    fn buttons_map_to_actions() {
        for button in BUTTONS {
            assert!(button_action(button.action).is_some());
        }
        assert_eq!(button_action("draw"), Some(TableAction::Draw));
        assert_eq!(button_action("shuffle"), None);
    }

    #[test]
    fn table_view_mirrors_state() {
        let mut state = TableState::deal(create_deck(), DEFAULT_HAND_SIZE);
        let view = TableView::from_state(&state);
        assert_eq!(view.player.len(), 5);
        assert_eq!(view.opponent.len(), 5);
        assert_eq!(view.deck.label, text::deck_label(42));
        assert_eq!(view.discard.label, text::DISCARD_PLACEHOLDER);
        assert_eq!(view.player[0].id, state.player_hand[0].id());

        let first = state.player_hand.remove(0);
        let second = state.player_hand.remove(0);
        state.discard.extend([first, second]);
        let view = TableView::from_state(&state);
        assert_eq!(view.discard.label, second.label());
    }
}
