//! Integration tests for configuration assembly from the process environment
//!
//! Note: Tests that modify environment variables hold ENV_MUTEX to avoid
//! interference between tests.

use nexaframe_config::config::{
    ConfigRegistry, DomainConfig, DomainName, Overrides, Priority, Propagation,
};
use secrecy::ExposeSecret;
use std::sync::Mutex;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const MANAGED_VARS: &[&str] = &[
    "APP_ENV",
    "DB_TYPE",
    "DB_HOST",
    "DB_PORT",
    "DB_NAME",
    "DB_USER",
    "DB_PASSWORD",
    "DB_WRITE_HOST",
    "DB_WRITE_USER",
    "DB_WRITE_PASSWORD",
    "DB_READ_HOST_1",
    "DB_READ_HOST_2",
    "DB_REPLICATION_ENABLED",
    "CACHE_TYPE",
    "CACHE_HOST",
    "CACHE_PORT",
    "CACHE_RETRY_STEP_MS",
    "HTTP_HOST",
    "HTTP_PORT",
    "HTTP_SSL_ENABLED",
    "QUEUE_TYPE",
    "QUEUE_HOST",
    "QUEUE_PORT",
    "QUEUE_DEFAULT_PRIORITY",
    "EVENT_PROPAGATION",
    "PAYMENT_SERVICE_API_KEY",
    "PAYMENT_SERVICE_ENDPOINT",
];

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    for var in MANAGED_VARS {
        std::env::remove_var(var);
    }
}

#[test]
fn test_from_env_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let registry = ConfigRegistry::from_env();

    assert_eq!(registry.app().environment(), "dev");
    assert_eq!(registry.database().kind, "mysql");
    assert_eq!(registry.database().connection.port, 3306);
    assert_eq!(registry.database().connection.database, "nexaframe_db");
    assert_eq!(registry.cache().connection.host, "localhost");
    assert_eq!(registry.cache().connection.port, 6379);
    assert_eq!(registry.queue().connection.port, 5672);
    assert_eq!(registry.http().server.port, 3000);
    assert!(!registry.http().ssl.enabled);
    assert!(registry.database().replication.read.is_empty());
}

#[test]
fn test_from_env_reads_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    std::env::set_var("APP_ENV", "production");
    std::env::set_var("HTTP_PORT", "8080");
    std::env::set_var("HTTP_SSL_ENABLED", "TRUE");
    std::env::set_var("EVENT_PROPAGATION", "async");
    std::env::set_var("QUEUE_DEFAULT_PRIORITY", "HIGH");

    let registry = ConfigRegistry::from_env();
    cleanup_env_vars();

    assert_eq!(registry.app().environment(), "production");
    assert_eq!(registry.http().server.port, 8080);
    assert!(registry.http().ssl.enabled);
    assert_eq!(registry.events().policies.propagation, Propagation::Async);
    assert_eq!(registry.queue().settings.default_priority, Priority::High);
}

#[test]
fn test_from_env_derives_ports_from_system_type() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    std::env::set_var("DB_TYPE", "postgresql");
    std::env::set_var("CACHE_TYPE", "memcached");
    std::env::set_var("QUEUE_TYPE", "kafka");

    let registry = ConfigRegistry::from_env();
    cleanup_env_vars();

    assert_eq!(registry.database().connection.port, 5432);
    assert_eq!(registry.cache().connection.port, 11211);
    assert_eq!(registry.queue().connection.port, 9092);
}

#[test]
fn test_explicit_port_beats_derived_port() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    std::env::set_var("DB_TYPE", "postgresql");
    std::env::set_var("DB_PORT", "6543");
    std::env::set_var("CACHE_PORT", "not-a-port");

    let registry = ConfigRegistry::from_env();
    cleanup_env_vars();

    assert_eq!(registry.database().connection.port, 6543);
    assert_eq!(registry.cache().connection.port, 6379);
}

#[test]
fn test_write_endpoint_inherits_from_primary() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    std::env::set_var("DB_HOST", "db.internal");
    std::env::set_var("DB_USER", "app");
    std::env::set_var("DB_PASSWORD", "primary-secret");
    std::env::set_var("DB_WRITE_HOST", "writer.internal");

    let registry = ConfigRegistry::from_env();
    cleanup_env_vars();

    let write = &registry.database().replication.write;
    assert_eq!(write.host, "writer.internal");
    assert_eq!(write.user, "app");
    assert_eq!(write.password.expose_secret(), "primary-secret");
}

#[test]
fn test_read_replicas_from_env() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    std::env::set_var("DB_READ_HOST_1", "replica-a");
    std::env::set_var("DB_READ_HOST_2", "replica-b");

    let registry = ConfigRegistry::from_env();
    cleanup_env_vars();

    let hosts: Vec<&str> = registry
        .database()
        .replication
        .read
        .iter()
        .map(|endpoint| endpoint.host.as_str())
        .collect();
    assert_eq!(hosts, vec!["replica-a", "replica-b"]);
}

#[test]
fn test_cache_backoff_from_env() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    std::env::set_var("CACHE_RETRY_STEP_MS", "100");

    let registry = ConfigRegistry::from_env();
    cleanup_env_vars();

    let retry = &registry.cache().connection.retry;
    assert_eq!(retry.delay_ms(0), 0);
    assert_eq!(retry.delay_ms(5), 500);
    assert_eq!(retry.delay_ms(100), 2000);
}

#[test]
fn test_services_from_env() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    std::env::set_var("PAYMENT_SERVICE_API_KEY", "pk_live_123");
    std::env::set_var("PAYMENT_SERVICE_ENDPOINT", "https://pay.example.com");

    let registry = ConfigRegistry::from_env();
    cleanup_env_vars();

    let payment = registry.services().integration("paymentService").unwrap();
    assert!(payment.is_configured());
    assert_eq!(
        payment.api_key.as_ref().unwrap().expose_secret(),
        "pk_live_123"
    );
    assert!(registry.services().integration("smsService").is_none());

    let snapshot = registry.snapshot().unwrap();
    assert_eq!(
        snapshot["services"]["integrations"]["paymentService"]["api_key"],
        "[REDACTED]"
    );
}

#[test]
fn test_event_listeners() {
    let registry = ConfigRegistry::assemble(&Overrides::new());

    assert_eq!(
        registry.events().listeners_for("userRegistered"),
        ["sendWelcomeEmail", "updateStats"]
    );
    assert_eq!(
        registry.events().listeners_for("orderPlaced"),
        ["processOrder", "sendOrderEmail"]
    );
    assert!(registry.events().listeners_for("userDeleted").is_empty());
}

#[test]
fn test_set_environment_visible_to_later_readers() {
    let mut registry = ConfigRegistry::assemble(&Overrides::new());
    let before = registry.app().as_ref().clone();

    registry
        .app_mut()
        .expect("app domain not yet shared")
        .set_environment("prod");

    let after = match registry.get(DomainName::App) {
        DomainConfig::App(app) => app,
        other => panic!("unexpected domain {}", other.name()),
    };
    assert_eq!(after.environment(), "prod");
    assert_eq!(after.timezone(), before.timezone());
    assert_eq!(after.locale(), before.locale());
    assert_eq!(after.session, before.session);
}

#[test]
fn test_get_returns_same_instance() {
    let registry = ConfigRegistry::assemble(&Overrides::new());

    for domain in DomainName::ALL {
        assert!(registry.get(domain).ptr_eq(&registry.get(domain)));
    }
}

#[test]
fn test_shared_registry_across_threads() {
    let registry = std::sync::Arc::new(ConfigRegistry::assemble(&Overrides::new()));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = std::sync::Arc::clone(&registry);
            std::thread::spawn(move || registry.http().server.port)
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 3000);
    }
}
