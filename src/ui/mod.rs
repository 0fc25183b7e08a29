//! 浏览器界面：纯展示数据（view）、DOM 构建（dom）与挂载及事件委托（app）。

pub mod app;
pub mod dom;
pub mod view;

pub use app::{mount, TableApp};
pub use view::{CardView, PileView, TableView};
