use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, DragEvent, Element, Event, Window};

use super::{
    dom,
    view::{self, TableView},
};
use crate::config::TableConfig;
use crate::game::{notice_for, RuleError, TableAction, TableController};

/// 挂载在宿主页面上的牌桌：控制器加上它所渲染的容器。
pub struct TableApp {
    controller: RefCell<TableController>,
    window: Window,
    document: Document,
    container: Element,
}

impl TableApp {
    fn render(&self) -> Result<(), JsValue> {
        let table = TableView::from_state(self.controller.borrow().state());
        dom::render(&self.document, &self.container, &table)
    }

    fn alert(&self, message: &str) {
        if let Err(error) = self.window.alert_with_message(message) {
            log::warn!("alert failed: {error:?}");
        }
    }

    /// 分派一个操作，弹出需要告知玩家的消息，然后重绘。
    fn handle(&self, action: TableAction) -> Result<(), JsValue> {
        let outcome = self.controller.borrow_mut().apply(action);
        match outcome {
            Ok(events) => {
                if let Some(notice) = notice_for(&events) {
                    self.alert(notice);
                }
            }
            Err(error) => self.report(&error),
        }

        // 拖动开始时重绘会销毁正在被拖动的元素
        if matches!(action, TableAction::DragStart { .. }) {
            return Ok(());
        }
        self.render()
    }

    fn report(&self, error: &RuleError) {
        match error.user_message() {
            Some(message) => self.alert(message),
            None => log::debug!("ignored: {error}"),
        }
    }
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn action_for(event: &Event) -> Option<TableAction> {
    let target = event_element(event)?;
    match event.type_().as_str() {
        "click" => dom::closest_attr(&target, dom::ACTION_ATTR)
            .as_deref()
            .and_then(view::button_action),
        "dragstart" => {
            let index = dom::closest_index(&target)?;
            if let Some(transfer) = event.dyn_ref::<DragEvent>().and_then(DragEvent::data_transfer) {
                // 部分浏览器要求写入数据后拖动才会开始
                let _ = transfer.set_data("text/plain", &index.to_string());
            }
            Some(TableAction::DragStart { index })
        }
        "drop" => {
            let index = dom::closest_index(&target)?;
            event.prevent_default();
            Some(TableAction::Drop { index })
        }
        "dragover" => {
            if dom::closest_index(&target).is_some() {
                event.prevent_default();
            }
            None
        }
        _ => None,
    }
}

fn listen(app: &Rc<TableApp>, kind: &str) -> Result<(), JsValue> {
    let handle = Rc::clone(app);
    let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Some(action) = action_for(&event) {
            if let Err(error) = handle.handle(action) {
                log::error!("render failed: {error:?}");
            }
        }
    });
    app.container
        .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
    // 牌桌与页面同寿命
    callback.forget();
    Ok(())
}

/// 把牌桌挂到 `config.container_id` 指定的元素上：发牌、首次渲染并安装事件委托。
pub fn mount(config: TableConfig) -> Result<Rc<TableApp>, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;
    let container = document
        .get_element_by_id(&config.container_id)
        .ok_or_else(|| {
            JsValue::from_str(&format!("container #{} not found", config.container_id))
        })?;

    log::info!("mounting table on #{}", config.container_id);
    let app = Rc::new(TableApp {
        controller: RefCell::new(TableController::new(config)),
        window,
        document,
        container,
    });
    app.render()?;

    for kind in ["click", "dragstart", "dragover", "drop"] {
        listen(&app, kind)?;
    }
    Ok(app)
}
