use std::env;
use std::fs;
use tempfile::TempDir;

/// .env files load in the same order as main.rs: .env.local first, then
/// .env. dotenvy never overrides variables that are already set, so the
/// local file and the real environment win.
#[test]
fn test_dotenv_loading_order() {
    let temp_dir = TempDir::new().unwrap();

    env::remove_var("UPPYE_TEST_BASE");
    env::remove_var("UPPYE_TEST_OVERRIDDEN");
    env::remove_var("UPPYE_TEST_FROM_ENVIRONMENT");

    let env_path = temp_dir.path().join(".env");
    fs::write(
        &env_path,
        "UPPYE_TEST_BASE=from_env\nUPPYE_TEST_OVERRIDDEN=from_env\nUPPYE_TEST_FROM_ENVIRONMENT=from_env\n",
    )
    .unwrap();

    let env_local_path = temp_dir.path().join(".env.local");
    fs::write(&env_local_path, "UPPYE_TEST_OVERRIDDEN=from_env_local\n").unwrap();

    env::set_var("UPPYE_TEST_FROM_ENVIRONMENT", "from_environment");

    dotenvy::from_path(&env_local_path).ok();
    dotenvy::from_path(&env_path).ok();

    assert_eq!(env::var("UPPYE_TEST_BASE").unwrap(), "from_env");
    assert_eq!(env::var("UPPYE_TEST_OVERRIDDEN").unwrap(), "from_env_local");
    assert_eq!(
        env::var("UPPYE_TEST_FROM_ENVIRONMENT").unwrap(),
        "from_environment"
    );

    env::remove_var("UPPYE_TEST_BASE");
    env::remove_var("UPPYE_TEST_OVERRIDDEN");
    env::remove_var("UPPYE_TEST_FROM_ENVIRONMENT");
}

/// Both files are optional; loading missing ones must not fail.
#[test]
fn test_missing_dotenv_files() {
    let temp_dir = TempDir::new().unwrap();

    dotenvy::from_path(temp_dir.path().join(".env")).ok();
    dotenvy::from_path(temp_dir.path().join(".env.local")).ok();
}

/// UPPYE-prefixed variables flow through the same way the settings
/// loader consumes them.
#[test]
fn test_uppye_env_vars() {
    let temp_dir = TempDir::new().unwrap();

    env::remove_var("UPPYE__API__BIND_ADDRESS");
    env::remove_var("UPPYE__AUTH__REFRESH_TOKEN_TTL");

    let env_path = temp_dir.path().join(".env");
    fs::write(
        &env_path,
        "UPPYE__API__BIND_ADDRESS=127.0.0.1:9999\nUPPYE__AUTH__REFRESH_TOKEN_TTL=14d\n",
    )
    .unwrap();

    let env_local_path = temp_dir.path().join(".env.local");
    fs::write(&env_local_path, "UPPYE__API__BIND_ADDRESS=127.0.0.1:8888\n").unwrap();

    dotenvy::from_path(&env_local_path).ok();
    dotenvy::from_path(&env_path).ok();

    // .env.local wins for the bind address, the TTL only exists in .env.
    assert_eq!(
        env::var("UPPYE__API__BIND_ADDRESS").unwrap(),
        "127.0.0.1:8888"
    );
    assert_eq!(env::var("UPPYE__AUTH__REFRESH_TOKEN_TTL").unwrap(), "14d");

    env::remove_var("UPPYE__API__BIND_ADDRESS");
    env::remove_var("UPPYE__AUTH__REFRESH_TOKEN_TTL");
}
