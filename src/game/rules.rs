use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    state::{IntegrityError, TableEvent, TableState},
    text,
};

/// 牌桌上所有可能的操作。每个按钮点击或拖放回调都对应其中一个。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum TableAction {
    Draw,
    DragStart { index: usize },
    Drop { index: usize },
    Discard,
    Place,
    CancelDrag,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Error)]
#[serde(tag = "type")]
pub enum RuleError {
    #[error("the deck is empty")]
    EmptyDeck,
    #[error("no card is selected")]
    NoSelection,
    #[error("hand index {index} is out of range for {len} cards")]
    HandIndexOutOfRange { index: usize, len: usize },
    #[error("table integrity violated: {error}")]
    IntegrityViolation { error: IntegrityError },
}

impl RuleError {
    /// 需要弹窗告知玩家的错误所对应的文案；其余错误只记录日志。
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            RuleError::EmptyDeck => Some(text::NO_CARDS_IN_DECK),
            RuleError::NoSelection => Some(text::SELECT_BEFORE_DISCARD),
            RuleError::HandIndexOutOfRange { .. } | RuleError::IntegrityViolation { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleResolution {
    pub state: TableState,
    pub events: Vec<TableEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// 一组事件中需要展示给玩家的确认信息（目前只有“放下”）。
pub fn notice_for(events: &[TableEvent]) -> Option<&'static str> {
    events
        .iter()
        .any(|event| matches!(event, TableEvent::CardsPlaced))
        .then_some(text::CARDS_PLACED)
}

impl RuleResolution {
    pub fn new(state: TableState, events: Vec<TableEvent>) -> Self {
        let notice = notice_for(&events).map(str::to_string);
        Self {
            state,
            events,
            notice,
        }
    }
}

/// 状态转换的唯一入口：按操作类型分派，所有前置条件在修改状态之前检查完毕，
/// 因此返回 `Err` 时状态保持不变。
#[derive(Debug, Default)]
pub struct RuleEngine;

impl RuleEngine {
    pub fn new() -> Self {
        Self
    }

    fn ensure_integrity(state: &TableState) -> Result<(), RuleError> {
        state
            .integrity_check()
            .map_err(|error| RuleError::IntegrityViolation { error })
    }

    fn ensure_hand_index(state: &TableState, index: usize) -> Result<(), RuleError> {
        let len = state.player_hand.len();
        if index >= len {
            return Err(RuleError::HandIndexOutOfRange { index, len });
        }
        Ok(())
    }

    pub fn apply(
        &mut self,
        state: &mut TableState,
        action: TableAction,
    ) -> Result<Vec<TableEvent>, RuleError> {
        Self::ensure_integrity(state)?;

        let events = match action {
            TableAction::Draw => Self::draw(state)?,
            TableAction::DragStart { index } => Self::drag_start(state, index)?,
            TableAction::Drop { index } => Self::drop_at(state, index)?,
            TableAction::Discard => Self::discard(state)?,
            TableAction::Place => vec![TableEvent::CardsPlaced],
            TableAction::CancelDrag => Self::cancel_drag(state),
        };

        for event in &events {
            state.record_event(event.clone());
        }
        log::debug!("{:?} -> {} event(s)", action, events.len());
        Ok(events)
    }

    fn draw(state: &mut TableState) -> Result<Vec<TableEvent>, RuleError> {
        if state.deck.is_empty() {
            return Err(RuleError::EmptyDeck);
        }
        let card = state.deck.remove(0);
        state.player_hand.push(card);
        Ok(vec![TableEvent::CardDrawn { card }])
    }

    fn drag_start(state: &mut TableState, index: usize) -> Result<Vec<TableEvent>, RuleError> {
        Self::ensure_hand_index(state, index)?;
        // 新的拖动会覆盖尚未完成的选择，而不是排队
        let replaced = state.drag_index.replace(index);
        if let Some(previous) = replaced {
            log::debug!("drag selection {previous} abandoned for {index}");
        }
        Ok(vec![TableEvent::DragStarted { index, replaced }])
    }

    /// `index` 按移除被拖动的牌之后的手牌解释：放回原位不改变顺序，放到最后一位即追加到末尾。
    fn drop_at(state: &mut TableState, index: usize) -> Result<Vec<TableEvent>, RuleError> {
        let Some(from) = state.drag_index else {
            return Ok(Vec::new());
        };
        Self::ensure_hand_index(state, index)?;

        let card = state.player_hand.remove(from);
        state.player_hand.insert(index, card);
        state.drag_index = None;
        Ok(vec![TableEvent::HandReordered { from, to: index }])
    }

    fn discard(state: &mut TableState) -> Result<Vec<TableEvent>, RuleError> {
        let from = state.drag_index.ok_or(RuleError::NoSelection)?;
        let card = state.player_hand.remove(from);
        state.discard.push(card);
        state.drag_index = None;
        Ok(vec![TableEvent::CardDiscarded { card }])
    }

    fn cancel_drag(state: &mut TableState) -> Vec<TableEvent> {
        state
            .drag_index
            .take()
            .map(|index| vec![TableEvent::DragCancelled { index }])
            .unwrap_or_default()
    }
}

/// 纯函数形式的状态转换：`(state, action) -> state`，不修改输入。
pub fn transition(state: &TableState, action: TableAction) -> Result<RuleResolution, RuleError> {
    let mut next = state.clone();
    let events = RuleEngine::new().apply(&mut next, action)?;
    Ok(RuleResolution::new(next, events))
}
