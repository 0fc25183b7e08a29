//! 界面上固定显示的阿拉伯语文案。

/// 牌堆为空时抽牌的提示。
pub const NO_CARDS_IN_DECK: &str = "لا توجد أوراق في الرزمة";
/// 未拖选任何牌就弃牌时的提示。
pub const SELECT_BEFORE_DISCARD: &str = "اختر ورقة بالسحب قبل الرمي";
/// “放下”按钮的确认信息（仅为示例，不改变状态）。
pub const CARDS_PLACED: &str = "تم انزال المجموعات (مثال فقط)";
/// 弃牌堆为空时的占位文字。
pub const DISCARD_PLACEHOLDER: &str = "البحر";

pub const DRAW_BUTTON: &str = "اسحب";
pub const DISCARD_BUTTON: &str = "ارمي";
pub const PLACE_BUTTON: &str = "انزل";

/// 牌堆标签：`الرزمة\n<count> ورقة`。
pub fn deck_label(count: usize) -> String {
    format!("الرزمة\n{count} ورقة")
}
