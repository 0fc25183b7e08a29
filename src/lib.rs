pub mod config;
pub mod game;
pub mod logging;
pub mod ui;

use log::LevelFilter;
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

pub use config::TableConfig;
pub use game::{
    create_deck, shuffle, transition, Card, CardId, IntegrityError, Rank, RuleEngine, RuleError,
    RuleResolution, Suit, TableAction, TableController, TableEvent, TableState, Zone, DECK_SIZE,
    DEFAULT_HAND_SIZE,
};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn start() {
    set_panic_hook();
    logging::init(LevelFilter::Info);
}

fn to_js_error(error: RuleError) -> JsValue {
    to_value(&error).unwrap_or_else(|serialize_err| JsValue::from_str(&serialize_err.to_string()))
}

fn serde_to_js_error<E: std::fmt::Display>(error: E) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(serde_to_js_error)
}

fn load_config(config_json: Option<String>) -> Result<TableConfig, JsValue> {
    let config = TableConfig::from_json(config_json.as_deref()).map_err(serde_to_js_error)?;
    logging::init(config.level_filter());
    Ok(config)
}

/// 不带 DOM 的牌桌句柄，供宿主自行渲染或测试使用。每个操作返回 `RuleResolution` 的 JSON。
#[wasm_bindgen]
pub struct TableEngine {
    controller: TableController,
}

#[wasm_bindgen]
impl TableEngine {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<TableEngine, JsValue> {
        let config = load_config(config_json)?;
        Ok(TableEngine {
            controller: TableController::new(config),
        })
    }

    pub fn state_json(&self) -> Result<String, JsValue> {
        self.controller.state_json().map_err(serde_to_js_error)
    }

    pub fn set_state_json(&mut self, json: &str) -> Result<(), JsValue> {
        let state: TableState = serde_json::from_str(json).map_err(serde_to_js_error)?;
        let config = self.controller.config().clone();
        self.controller = TableController::from_state(state, config).map_err(to_js_error)?;
        Ok(())
    }

    pub fn dispatch_json(&mut self, action_json: &str) -> Result<String, JsValue> {
        let action: TableAction = serde_json::from_str(action_json).map_err(serde_to_js_error)?;
        self.apply(action)
    }

    pub fn draw(&mut self) -> Result<String, JsValue> {
        self.apply(TableAction::Draw)
    }

    pub fn drag_start(&mut self, index: usize) -> Result<String, JsValue> {
        self.apply(TableAction::DragStart { index })
    }

    #[wasm_bindgen(js_name = "drop")]
    pub fn drop_at(&mut self, index: usize) -> Result<String, JsValue> {
        self.apply(TableAction::Drop { index })
    }

    pub fn discard(&mut self) -> Result<String, JsValue> {
        self.apply(TableAction::Discard)
    }

    pub fn place(&mut self) -> Result<String, JsValue> {
        self.apply(TableAction::Place)
    }

    pub fn cancel_drag(&mut self) -> Result<String, JsValue> {
        self.apply(TableAction::CancelDrag)
    }

    fn apply(&mut self, action: TableAction) -> Result<String, JsValue> {
        let resolution = self.controller.dispatch(action).map_err(to_js_error)?;
        to_json(&resolution)
    }
}

/// 在宿主页面的容器元素上挂载完整的牌桌界面。
#[wasm_bindgen(js_name = "mountTable")]
pub fn mount_table(config_json: Option<String>) -> Result<(), JsValue> {
    let config = load_config(config_json)?;
    ui::mount(config)?;
    Ok(())
}

/// 返回按固定顺序排列的 52 张牌。
#[wasm_bindgen(js_name = "createDeck")]
pub fn create_deck_js() -> Result<JsValue, JsValue> {
    to_value(&create_deck()).map_err(JsValue::from)
}

/// 按配置洗牌并发牌，返回新的牌桌状态。
#[wasm_bindgen(js_name = "dealTable")]
pub fn deal_table(config_json: Option<String>) -> Result<JsValue, JsValue> {
    let config = load_config(config_json)?;
    let controller = TableController::new(config);
    to_value(controller.state()).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = "applyAction")]
pub fn apply_action(state: JsValue, action: JsValue) -> Result<JsValue, JsValue> {
    let state: TableState = from_value(state).map_err(JsValue::from)?;
    let action: TableAction = from_value(action).map_err(JsValue::from)?;
    match transition(&state, action) {
        Ok(resolution) => to_value(&resolution).map_err(JsValue::from),
        Err(error) => Err(to_js_error(error)),
    }
}

#[wasm_bindgen(js_name = "validateTable")]
pub fn validate_table(state: JsValue) -> Result<(), JsValue> {
    let state: TableState = from_value(state).map_err(JsValue::from)?;
    state
        .integrity_check()
        .map_err(|error| to_js_error(RuleError::IntegrityViolation { error }))?;
    Ok(())
}

#[cfg(feature = "console_error_panic_hook")]
fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

#[cfg(not(feature = "console_error_panic_hook"))]
fn set_panic_hook() {}
