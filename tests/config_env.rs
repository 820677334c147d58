//! `ServerConfig::from_env` against the real process environment.

mod test_helpers;

use palladio::config::{ConfigError, ServerConfig, StorageConfig};
use test_helpers::EnvVarGuard;

const VARS: [&str; 4] = [
    "PALLADIO_DATABASE_URL",
    "PALLADIO_BIND_ADDR",
    "PALLADIO_DB_POOL_SIZE",
    "PALLADIO_RUN_MIGRATIONS",
];

fn cleared_except(overrides: &[(&'static str, Option<&'static str>)]) -> EnvVarGuard {
    let mut changes: Vec<(&str, Option<&str>)> = VARS.iter().map(|var| (*var, None)).collect();
    changes.extend_from_slice(overrides);
    EnvVarGuard::set_many(&changes)
}

#[test]
fn empty_environment_selects_in_memory_defaults() {
    let _guard = cleared_except(&[]);

    let config = ServerConfig::from_env().expect("defaults are valid");

    assert_eq!(config.storage, StorageConfig::InMemory);
    assert_eq!(config.bind_addr.port(), 8080);
}

#[test]
fn environment_selects_postgres() {
    let _guard = cleared_except(&[
        ("PALLADIO_DATABASE_URL", Some("postgres://db.example/palladio")),
        ("PALLADIO_RUN_MIGRATIONS", Some("false")),
    ]);

    let config = ServerConfig::from_env().expect("valid environment");

    assert_eq!(
        config.storage,
        StorageConfig::Postgres {
            database_url: "postgres://db.example/palladio".to_owned(),
            pool_size: 10,
            run_migrations: false,
        }
    );
}

#[test]
fn invalid_pool_size_is_reported() {
    let _guard = cleared_except(&[
        ("PALLADIO_DATABASE_URL", Some("postgres://db.example/palladio")),
        ("PALLADIO_DB_POOL_SIZE", Some("many")),
    ]);

    let err = ServerConfig::from_env().expect_err("pool size should be rejected");

    assert!(matches!(
        err,
        ConfigError::InvalidValue {
            variable: "PALLADIO_DB_POOL_SIZE",
            ..
        }
    ));
}
