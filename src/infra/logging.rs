// src/infra/logging.rs

use std::sync::Once;

/// Фильтр по умолчанию: шум зависимостей глушим, свои переходы видим.
pub const DEFAULT_FILTER: &str = "warn,chess_clock=info";

/// Настройки логгера.
///
/// `env_filter` — синтаксис `env_logger` ("info", "chess_clock=debug" и т.п.).
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    /// Показывать путь модуля (`chess_clock::engine::controller`) в каждой строке.
    pub module_path: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            module_path: false,
        }
    }
}

impl LoggingConfig {
    /// Подробный лог переходов часов, для отладки.
    pub fn verbose() -> Self {
        Self {
            env_filter: Some("warn,chess_clock=trace".to_string()),
            module_path: true,
            ..Self::default()
        }
    }
}

/// Какой фильтр применить: явный из конфига, затем `RUST_LOG`, затем `DEFAULT_FILTER`.
pub fn effective_filter(configured: Option<&str>, rust_log: Option<&str>) -> String {
    configured
        .or(rust_log)
        .filter(|f| !f.trim().is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

static INIT: Once = Once::new();

/// Один раз инициализировать глобальный логгер; повторные вызовы ничего не делают.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let rust_log = std::env::var("RUST_LOG").ok();
        let filter = effective_filter(config.env_filter.as_deref(), rust_log.as_deref());

        let mut builder = env_logger::Builder::new();
        builder
            .parse_filters(&filter)
            .write_style(config.write_style)
            .format_timestamp_millis()
            .format_module_path(config.module_path);

        // try_init: в тестах логгер мог поставить кто-то другой.
        if builder.try_init().is_ok() {
            log::debug!("логгер инициализирован, фильтр {:?}", filter);
        }
    });
}
