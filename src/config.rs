use crate::{ConfigError, HIGHEST_PRECEDENCE};

const HOOK_ORDER_VAR: &str = "POST_ACTION_HOOK_ORDER";
const CATCH_PANICS_VAR: &str = "POST_ACTION_CATCH_PANICS";

/// Settings for a [`crate::PostActionHandler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerConfig {
    /// Order reported by the completion hook. Defaults to
    /// [`HIGHEST_PRECEDENCE`] so deferred actions run before any other
    /// observer of the same transaction.
    pub hook_order: i32,
    /// Treat a panicking action like a failed one instead of unwinding
    /// through the transaction manager.
    pub catch_panics: bool,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            hook_order: HIGHEST_PRECEDENCE,
            catch_panics: true,
        }
    }
}

impl HandlerConfig {
    /// Set the order reported by the completion hook.
    pub fn with_hook_order(mut self, hook_order: i32) -> Self {
        self.hook_order = hook_order;
        self
    }

    /// Set whether action panics are caught.
    pub fn with_catch_panics(mut self, catch_panics: bool) -> Self {
        self.catch_panics = catch_panics;
        self
    }

    /// Defaults overridden by `POST_ACTION_HOOK_ORDER` and
    /// `POST_ACTION_CATCH_PANICS` when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(order) = env_var(HOOK_ORDER_VAR) {
            config.hook_order = order.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: HOOK_ORDER_VAR,
                value: order,
            })?;
        }
        if let Some(flag) = env_var(CATCH_PANICS_VAR) {
            config.catch_panics = parse_flag(&flag).ok_or_else(|| ConfigError::InvalidValue {
                key: CATCH_PANICS_VAR,
                value: flag,
            })?;
        }
        Ok(config)
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
