//! 运行时配置
//!
//! BaaS 地址与项目 ID 在编译期通过环境变量注入，
//! 浏览器 LocalStorage 中的同名键可以覆盖它们（方便切换到测试项目）。

use crate::web::BrowserStorage;
use leptos::prelude::*;
use modelgen::GenerationSettings;

const DEFAULT_BAAS_URL: &str = "https://api.modelgen.dev";
const DEFAULT_PROJECT_ID: &str = "modelgen";

const STORAGE_BAAS_URL_KEY: &str = "modelgen_baas_url";
const STORAGE_PROJECT_ID_KEY: &str = "modelgen_project_id";
const STORAGE_SETTINGS_KEY: &str = "modelgen_generation_settings";

/// 会话状态的定期复查间隔
pub const SESSION_REFRESH_MS: u32 = 60_000;
/// 提示消息的自动关闭时间
pub const TOAST_DISMISS_MS: u32 = 4_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub baas_url: String,
    pub project_id: String,
    pub generation: GenerationSettings,
}

impl AppConfig {
    pub fn load() -> Self {
        let config = Self {
            baas_url: resolve(
                BrowserStorage::get(STORAGE_BAAS_URL_KEY),
                option_env!("MODELGEN_BAAS_URL"),
                DEFAULT_BAAS_URL,
            )
            .trim_end_matches('/')
            .to_string(),
            project_id: resolve(
                BrowserStorage::get(STORAGE_PROJECT_ID_KEY),
                option_env!("MODELGEN_PROJECT_ID"),
                DEFAULT_PROJECT_ID,
            ),
            generation: BrowserStorage::get_json(STORAGE_SETTINGS_KEY).unwrap_or_default(),
        };
        log::info!(
            "[Config] baas={} project={}",
            config.baas_url,
            config.project_id
        );
        config
    }
}

/// 从 Context 获取配置（由 `App` 提供）
pub fn use_config() -> AppConfig {
    use_context::<AppConfig>().expect("AppConfig should be provided")
}

/// 优先级：LocalStorage 覆盖 > 编译期环境变量 > 默认值；空白值视为未设置
fn resolve(stored: Option<String>, compiled: Option<&str>, default: &str) -> String {
    stored
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            compiled
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_priority() {
        assert_eq!(resolve(Some("a".into()), Some("b"), "c"), "a");
        assert_eq!(resolve(Some("  ".into()), Some("b"), "c"), "b");
        assert_eq!(resolve(None, Some(""), "c"), "c");
    }
}
