//! 用 web-sys 把 [`TableView`] 画成 DOM 元素。这里的视图都是被动的，事件由容器统一委托处理。

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use super::view::{self, ButtonView, CardView, PileView, TableView};

pub const ACTION_ATTR: &str = "data-action";
pub const INDEX_ATTR: &str = "data-index";

fn styled(document: &Document, tag: &str, style: &str) -> Result<Element, JsValue> {
    let element = document.create_element(tag)?;
    element.set_attribute("style", style)?;
    Ok(element)
}

fn card(document: &Document, card: &CardView) -> Result<Element, JsValue> {
    let element = styled(document, "div", &card.style())?;
    element.set_id(&card.id);
    if card.draggable {
        element.set_attribute("draggable", "true")?;
    }
    if let Some(index) = card.index {
        element.set_attribute(INDEX_ATTR, &index.to_string())?;
    }
    element.set_text_content(card.label.as_deref());
    Ok(element)
}

fn hand(document: &Document, style: &str, cards: &[CardView]) -> Result<Element, JsValue> {
    let row = styled(document, "div", style)?;
    for view in cards {
        row.append_child(card(document, view)?.as_ref())?;
    }
    Ok(row)
}

fn pile(document: &Document, pile: &PileView) -> Result<Element, JsValue> {
    let element = styled(document, "div", &pile.style())?;
    element.set_text_content(Some(&pile.label));
    Ok(element)
}

fn button(document: &Document, button: &ButtonView) -> Result<Element, JsValue> {
    let element = document.create_element("button")?;
    element.set_attribute("type", "button")?;
    element.set_attribute(ACTION_ATTR, button.action)?;
    element.set_text_content(Some(button.label));
    Ok(element)
}

/// 清空容器并重新生成整张牌桌。
pub fn render(document: &Document, container: &Element, table: &TableView) -> Result<(), JsValue> {
    let root = styled(document, "div", view::ROOT_STYLE)?;

    root.append_child(hand(document, view::OPPONENT_HAND_STYLE, &table.opponent)?.as_ref())?;

    let piles = styled(document, "div", view::PILES_ROW_STYLE)?;
    piles.append_child(pile(document, &table.deck)?.as_ref())?;
    piles.append_child(pile(document, &table.discard)?.as_ref())?;
    root.append_child(&piles)?;

    root.append_child(hand(document, view::PLAYER_HAND_STYLE, &table.player)?.as_ref())?;

    let buttons = styled(document, "div", view::BUTTON_ROW_STYLE)?;
    for entry in &view::BUTTONS {
        buttons.append_child(button(document, entry)?.as_ref())?;
    }
    root.append_child(&buttons)?;

    container.set_inner_html("");
    container.append_child(&root)?;
    Ok(())
}

/// 从事件目标向上查找带有 `attr` 属性的元素并返回属性值。
pub fn closest_attr(target: &Element, attr: &str) -> Option<String> {
    target
        .closest(&format!("[{attr}]"))
        .ok()
        .flatten()
        .and_then(|element| element.get_attribute(attr))
}

pub fn closest_index(target: &Element) -> Option<usize> {
    closest_attr(target, INDEX_ATTR).and_then(|value| value.parse().ok())
}
