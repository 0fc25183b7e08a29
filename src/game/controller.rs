use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::{
    deck::{create_deck, shuffle},
    rules::{RuleEngine, RuleError, RuleResolution, TableAction},
    state::{TableEvent, TableState},
};
use crate::config::TableConfig;

/// 持有全部可变状态的控制器：开局时洗牌发牌一次，之后每个界面事件都经由 `dispatch` 同步执行完毕。
#[derive(Debug)]
pub struct TableController {
    state: TableState,
    engine: RuleEngine,
    config: TableConfig,
}

impl TableController {
    pub fn new(config: TableConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let mut deck = create_deck();
        shuffle(&mut deck, &mut rng);
        let state = TableState::deal(deck, config.hand_size);
        log::info!(
            "dealt {} / {} cards, {} left in deck",
            state.player_hand.len(),
            state.opponent_hand.len(),
            state.deck.len()
        );

        Self {
            state,
            engine: RuleEngine::new(),
            config,
        }
    }

    /// 从外部提供的状态恢复，先做完整性检查。
    pub fn from_state(state: TableState, config: TableConfig) -> Result<Self, RuleError> {
        state
            .integrity_check()
            .map_err(|error| RuleError::IntegrityViolation { error })?;
        Ok(Self {
            state,
            engine: RuleEngine::new(),
            config,
        })
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// 执行一个操作并只返回本次产生的事件，不复制状态。界面事件走这条路径。
    pub fn apply(&mut self, action: TableAction) -> Result<Vec<TableEvent>, RuleError> {
        self.engine
            .apply(&mut self.state, action)
            .inspect_err(|error| log::info!("{action:?} rejected: {error}"))
    }

    /// 与 `apply` 相同，但附带操作后的完整状态快照，供 JS 接口返回。
    pub fn dispatch(&mut self, action: TableAction) -> Result<RuleResolution, RuleError> {
        let events = self.apply(action)?;
        Ok(RuleResolution::new(self.state.clone(), events))
    }

    pub fn state_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::deck::DECK_SIZE;

    fn seeded(seed: u64) -> TableController {
        TableController::new(TableConfig::default().with_seed(seed))
    }

    #[test]
    fn new_controller_deals_five_each() {
        let controller = seeded(1);
        let state = controller.state();
        assert_eq!(state.player_hand.len(), 5);
        assert_eq!(state.opponent_hand.len(), 5);
        assert_eq!(state.deck.len(), DECK_SIZE - 10);
        assert!(state.discard.is_empty());
        state.integrity_check().expect("deal should be consistent");
    }

    #[test]
    fn same_seed_same_deal() {
        assert_eq!(seeded(11).state(), seeded(11).state());
        assert_ne!(seeded(11).state().deck, seeded(12).state().deck);
    }

    #[test]
    fn invariant_holds_through_a_session() {
        let mut controller = seeded(3);
        let script = [
            TableAction::Draw,
            TableAction::DragStart { index: 5 },
            TableAction::Drop { index: 0 },
            TableAction::Discard,
            TableAction::DragStart { index: 2 },
            TableAction::Discard,
            TableAction::Draw,
            TableAction::Place,
            TableAction::DragStart { index: 1 },
            TableAction::DragStart { index: 4 },
            TableAction::Drop { index: 4 },
        ];

        for action in script {
            let _ = controller.dispatch(action);
            controller
                .state()
                .integrity_check()
                .expect("every card stays in exactly one zone");
        }

        let state = controller.state();
        assert_eq!(state.discard.len(), 1);
        assert_eq!(state.player_hand.len(), 6);
        assert_eq!(state.opponent_hand.len(), 5);
    }

    #[test]
    fn exhausting_the_deck_then_drawing_warns() {
        let mut controller = seeded(5);
        for _ in 0..42 {
            controller.dispatch(TableAction::Draw).expect("deck still has cards");
        }
        let before = controller.state().clone();

        let error = controller
            .dispatch(TableAction::Draw)
            .expect_err("empty deck should refuse");

        assert_eq!(error, RuleError::EmptyDeck);
        assert_eq!(controller.state(), &before);
        assert_eq!(controller.state().player_hand.len(), 47);
    }

    #[test]
    fn opponent_hand_never_changes() {
        let mut controller = seeded(8);
        let opponent = controller.state().opponent_hand.clone();
        for action in [
            TableAction::Draw,
            TableAction::DragStart { index: 0 },
            TableAction::Discard,
            TableAction::Place,
        ] {
            controller.dispatch(action).expect("scripted action should succeed");
        }
        assert_eq!(controller.state().opponent_hand, opponent);
    }

    #[test]
    fn apply_returns_only_this_actions_events() {
        let mut controller = seeded(6);
        let front = controller.state().deck[0];

        let events = controller.apply(TableAction::Draw).expect("draw should succeed");
        assert_eq!(events, vec![TableEvent::CardDrawn { card: front }]);

        let events = controller.apply(TableAction::Place).expect("place should succeed");
        assert_eq!(events, vec![TableEvent::CardsPlaced]);
        assert_eq!(controller.state().event_log.len(), 3);

        assert_eq!(
            controller.apply(TableAction::Discard),
            Err(RuleError::NoSelection)
        );
        assert_eq!(controller.state().event_log.len(), 3);
    }

    #[test]
    fn from_state_rejects_broken_tables() {
        let mut state = seeded(2).state().clone();
        state.opponent_hand.clear();
        assert!(TableController::from_state(state, TableConfig::default()).is_err());
    }

    #[test]
    fn state_json_restores() {
        let controller = seeded(4);
        let json = controller.state_json().expect("state should serialize");
        let state: TableState = serde_json::from_str(&json).expect("state should parse");
        let restored =
            TableController::from_state(state, TableConfig::default()).expect("state is valid");
        assert_eq!(restored.state(), controller.state());
    }
}
