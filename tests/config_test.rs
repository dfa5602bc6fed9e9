use post_action_tx::{ConfigError, HandlerConfig, HIGHEST_PRECEDENCE};
use serial_test::serial;

const HOOK_ORDER_VAR: &str = "POST_ACTION_HOOK_ORDER";
const CATCH_PANICS_VAR: &str = "POST_ACTION_CATCH_PANICS";

fn reset_env() {
    std::env::remove_var(HOOK_ORDER_VAR);
    std::env::remove_var(CATCH_PANICS_VAR);
}

#[test]
fn defaults_give_the_hook_highest_precedence() {
    let config = HandlerConfig::default();
    assert_eq!(config.hook_order, HIGHEST_PRECEDENCE);
    assert!(config.catch_panics);
}

#[test]
#[serial]
fn from_env_without_variables_is_default() {
    reset_env();
    let config = HandlerConfig::from_env().expect("default config");
    assert_eq!(config, HandlerConfig::default());
}

#[test]
#[serial]
fn from_env_reads_overrides() {
    reset_env();
    std::env::set_var(HOOK_ORDER_VAR, " 10 ");
    std::env::set_var(CATCH_PANICS_VAR, "off");

    let config = HandlerConfig::from_env().expect("valid overrides");
    assert_eq!(config.hook_order, 10);
    assert!(!config.catch_panics);

    reset_env();
}

#[test]
#[serial]
fn from_env_rejects_invalid_values() {
    reset_env();
    std::env::set_var(HOOK_ORDER_VAR, "first");

    let err = HandlerConfig::from_env().expect_err("non-numeric order");
    assert!(matches!(
        err,
        ConfigError::InvalidValue { key: HOOK_ORDER_VAR, ref value } if value == "first"
    ));

    reset_env();
    std::env::set_var(CATCH_PANICS_VAR, "maybe");
    assert!(HandlerConfig::from_env().is_err());

    reset_env();
}
