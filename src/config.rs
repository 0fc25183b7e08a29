use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::game::DEFAULT_HAND_SIZE;

const DEFAULT_CONTAINER_ID: &str = "root";

/// 牌桌配置。宿主页面可以传入 JSON，缺省字段取默认值。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableConfig {
    pub hand_size: usize,
    /// 固定种子可复现洗牌结果；为空时使用浏览器熵源。
    pub seed: Option<u64>,
    pub container_id: String,
    pub log_level: String,
}

impl TableConfig {
    pub fn from_json(json: Option<&str>) -> Result<Self, serde_json::Error> {
        match json.map(str::trim).filter(|json| !json.is_empty()) {
            Some(json) => serde_json::from_str(json),
            None => Ok(Self::default()),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            hand_size: DEFAULT_HAND_SIZE,
            seed: None,
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            log_level: "info".to_string(),
        }
    }
}
