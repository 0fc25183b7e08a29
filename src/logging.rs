//! 把 `log` 宏输出转发到浏览器控制台。

use log::{Level, LevelFilter, Log, Metadata, Record};
use once_cell::sync::OnceCell;
use wasm_bindgen::JsValue;

static LOGGER: ConsoleLogger = ConsoleLogger;
static INSTALLED: OnceCell<()> = OnceCell::new();

struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record.level(), record.target(), &record.args().to_string());
        if !cfg!(target_arch = "wasm32") {
            return;
        }
        let value = JsValue::from_str(&line);
        match record.level() {
            Level::Error => web_sys::console::error_1(&value),
            Level::Warn => web_sys::console::warn_1(&value),
            Level::Info => web_sys::console::info_1(&value),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&value),
        }
    }

    fn flush(&self) {}
}

fn format_record(level: Level, target: &str, message: &str) -> String {
    format!("[{level:<5} {target}] {message}")
}

/// 安装控制台日志器，可重复调用；之后的调用只调整级别。
pub fn init(level: LevelFilter) {
    INSTALLED.get_or_init(|| {
        // 宿主可能已装好别的日志器，此时沿用它
        let _ = log::set_logger(&LOGGER);
    });
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_format_names_level_and_target() {
        assert_eq!(
            format_record(Level::Warn, "majlis_table::ui", "container missing"),
            "[WARN  majlis_table::ui] container missing"
        );
    }
}
