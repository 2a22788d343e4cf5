use admin_reset::config::ToolConfig;
use admin_reset::{auth, backup, db, ops};
use regex::Regex;
use rusqlite::{Connection, params};
use std::fs;
use tempfile::TempDir;

// ---- Helpers ----

// The tool consumes the application's schema but does not own it, so the
// tests create it the way the application would.
fn init_schema(conn: &Connection) {
    conn.execute_batch(
        r#"
        CREATE TABLE user (
            id                TEXT PRIMARY KEY,
            name              TEXT NOT NULL,
            email             TEXT NOT NULL UNIQUE,
            role              TEXT NOT NULL,
            profile_image_url TEXT,
            last_active_at    INTEGER,
            updated_at        INTEGER,
            created_at        INTEGER,
            api_key           TEXT,
            settings          TEXT,
            info              TEXT,
            oauth_sub         TEXT
        );
        CREATE TABLE auth (
            id       TEXT PRIMARY KEY,
            email    TEXT NOT NULL,
            password TEXT NOT NULL,
            active   INTEGER NOT NULL
        );
        "#,
    )
    .unwrap();
}

/// Fresh data directory containing an empty application database.
fn setup(dir: &TempDir) -> ToolConfig {
    let config = ToolConfig::new(dir.path().to_path_buf());
    let conn = Connection::open(&config.db_path).unwrap();
    init_schema(&conn);
    config
}

fn seed_user(config: &ToolConfig, id: &str, name: &str, email: &str, role: &str, created_at: i64) {
    let conn = Connection::open(&config.db_path).unwrap();
    conn.execute(
        "INSERT INTO user (id, name, email, role, profile_image_url,
                           last_active_at, updated_at, created_at)
         VALUES (?1, ?2, ?3, ?4, '/user.png', ?5, ?5, ?5)",
        params![id, name, email, role, created_at],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO auth (id, email, password, active) VALUES (?1, ?2, ?3, 1)",
        params![id, email, format!("old-hash-{id}")],
    )
    .unwrap();
}

fn backup_files(config: &ToolConfig) -> Vec<String> {
    let pattern = Regex::new(r"^webui_backup_\d{8}_\d{6}\.db$").unwrap();
    let mut names: Vec<String> = fs::read_dir(&config.data_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| pattern.is_match(n))
        .collect();
    names.sort();
    names
}

// ---- Input validation ----

#[test]
fn short_passwords_are_rejected() {
    assert!(ops::check_new_password("abc", "abc").is_err());
    assert!(ops::check_new_password("", "").is_err());
    assert!(ops::check_new_password("pass", "pass").is_ok());
}

#[test]
fn mismatched_passwords_are_rejected() {
    assert!(ops::check_new_password("pass1234", "pass123").is_err());
    assert!(ops::check_new_password("pass1234", "PASS1234").is_err());
    assert!(ops::check_new_password("pass1234", "pass1234").is_ok());
}

#[test]
fn email_must_contain_at_sign() {
    assert!(ops::check_email("").is_err());
    assert!(ops::check_email("bobexample.com").is_err());
    assert!(ops::check_email("bob@example.com").is_ok());
}

#[test]
fn name_must_be_nonempty() {
    assert!(ops::check_name("").is_err());
    assert!(ops::check_name("Bob").is_ok());
}

#[test]
fn confirmation_phrase_must_match_exactly() {
    assert!(ops::confirmation_matches("DELETE ALL DATA"));
    assert!(!ops::confirmation_matches("delete all data"));
    assert!(!ops::confirmation_matches("DELETE ALL DATA "));
    assert!(!ops::confirmation_matches("yes"));
    assert!(!ops::confirmation_matches(""));
}

// ---- Inspection ----

#[test]
fn empty_database_reports_no_users() {
    let dir = TempDir::new().unwrap();
    let config = setup(&dir);

    let conn = db::open(&config.db_path).unwrap();
    let summary = db::summarize(&conn).unwrap();
    assert_eq!(summary.user_count, 0);
    assert!(summary.first_user.is_none());
    assert!(summary.admin_users.is_empty());
}

#[test]
fn first_user_is_earliest_created() {
    let dir = TempDir::new().unwrap();
    let config = setup(&dir);
    seed_user(&config, "id-later", "Late", "late@example.com", "admin", 200);
    seed_user(&config, "id-early", "Early", "early@example.com", "user", 100);

    let conn = db::open(&config.db_path).unwrap();
    let summary = db::summarize(&conn).unwrap();
    assert_eq!(summary.user_count, 2);
    assert_eq!(summary.first_user.unwrap().id, "id-early");
    // only the admin-role user shows up in the admin list
    assert_eq!(summary.admin_users.len(), 1);
    assert_eq!(summary.admin_users[0].email, "late@example.com");
}

#[test]
fn open_refuses_missing_database() {
    let dir = TempDir::new().unwrap();
    let config = ToolConfig::new(dir.path().to_path_buf());

    assert!(db::open(&config.db_path).is_err());
    // open must not have created an empty file as a side effect
    assert!(!config.db_path.exists());
}

// ---- Backups ----

#[test]
fn backup_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let config = setup(&dir);
    seed_user(&config, "id-a", "Alice", "alice@example.com", "admin", 100);

    let backup_path = backup::create_backup(&config).unwrap();
    let original = fs::read(&config.db_path).unwrap();
    let copy = fs::read(&backup_path).unwrap();
    assert_eq!(original, copy);

    let names = backup_files(&config);
    assert_eq!(names.len(), 1);
    assert_eq!(
        backup_path.file_name().unwrap().to_string_lossy(),
        names[0]
    );
}

#[test]
fn backup_fails_when_database_missing() {
    let dir = TempDir::new().unwrap();
    let config = ToolConfig::new(dir.path().to_path_buf());

    assert!(backup::create_backup(&config).is_err());
    assert!(backup_files(&config).is_empty());
}

// ---- Full reset ----

#[test]
fn full_reset_deletes_database_and_keeps_backup() {
    let dir = TempDir::new().unwrap();
    let config = setup(&dir);
    seed_user(&config, "id-a", "Alice", "alice@example.com", "admin", 100);

    let outcome = ops::perform_full_reset(&config).unwrap();
    assert!(!config.db_path.exists());
    assert!(outcome.backup_path.exists());

    // exactly one well-formed timestamped backup remains
    let names = backup_files(&config);
    assert_eq!(names.len(), 1);
}

#[test]
fn full_reset_logs_the_action() {
    let dir = TempDir::new().unwrap();
    let config = setup(&dir);

    ops::perform_full_reset(&config).unwrap();
    let log = fs::read_to_string(config.log_path()).unwrap();
    assert!(log.contains("| FULL_RESET |"));
}

// ---- Password reset ----

#[test]
fn password_reset_updates_only_matching_credential() {
    let dir = TempDir::new().unwrap();
    let config = setup(&dir);
    seed_user(&config, "id-alice", "Alice", "alice@example.com", "admin", 100);
    seed_user(&config, "id-bob", "Bob", "bob@example.com", "user", 200);

    ops::perform_password_reset(&config, "id-alice", "pass1234").unwrap();

    let conn = db::open(&config.db_path).unwrap();
    let alice_hash: String = conn
        .query_row(
            "SELECT password FROM auth WHERE id = 'id-alice'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert!(auth::verify_password("pass1234", &alice_hash).unwrap());

    // bob's credential is untouched
    let bob_hash: String = conn
        .query_row("SELECT password FROM auth WHERE id = 'id-bob'", [], |r| {
            r.get(0)
        })
        .unwrap();
    assert_eq!(bob_hash, "old-hash-id-bob");

    // alice's user row keeps her name and email
    let (name, email): (String, String) = conn
        .query_row(
            "SELECT name, email FROM user WHERE id = 'id-alice'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(name, "Alice");
    assert_eq!(email, "alice@example.com");

    assert_eq!(backup_files(&config).len(), 1);
}

#[test]
fn password_reset_fails_without_credential_record() {
    let dir = TempDir::new().unwrap();
    let config = setup(&dir);

    assert!(ops::perform_password_reset(&config, "no-such-id", "pass1234").is_err());
}

// ---- Add admin ----

#[test]
fn add_admin_inserts_user_and_credential() {
    let dir = TempDir::new().unwrap();
    let config = setup(&dir);
    seed_user(&config, "id-alice", "Alice", "alice@example.com", "user", 100);

    let id = ops::perform_add_admin(&config, "bob@example.com", "Bob", "secret1").unwrap();

    let conn = db::open(&config.db_path).unwrap();
    assert_eq!(db::user_count(&conn).unwrap(), 2);

    let (role, image): (String, String) = conn
        .query_row(
            "SELECT role, profile_image_url FROM user WHERE id = ?1",
            params![id],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(role, "admin");
    assert_eq!(image, "/user.png");

    let (auth_email, hash, active): (String, String, i64) = conn
        .query_row(
            "SELECT email, password, active FROM auth WHERE id = ?1",
            params![id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .unwrap();
    assert_eq!(auth_email, "bob@example.com");
    assert_eq!(active, 1);
    assert!(auth::verify_password("secret1", &hash).unwrap());

    assert_eq!(backup_files(&config).len(), 1);
}

#[test]
fn add_admin_rejects_duplicate_email() {
    let dir = TempDir::new().unwrap();
    let config = setup(&dir);
    seed_user(&config, "id-alice", "Alice", "alice@example.com", "user", 100);

    let result = ops::perform_add_admin(&config, "alice@example.com", "Imposter", "secret1");
    assert!(result.is_err());

    let conn = db::open(&config.db_path).unwrap();
    assert_eq!(db::user_count(&conn).unwrap(), 1);
    // the collision is detected before the backup step
    assert!(backup_files(&config).is_empty());
}

#[test]
fn add_admin_works_on_empty_database() {
    let dir = TempDir::new().unwrap();
    let config = setup(&dir);

    let id = ops::perform_add_admin(&config, "first@example.com", "First", "pass1234").unwrap();

    let conn = db::open(&config.db_path).unwrap();
    assert_eq!(db::user_count(&conn).unwrap(), 1);
    let summary = db::summarize(&conn).unwrap();
    assert_eq!(summary.first_user.unwrap().id, id);
    assert_eq!(summary.admin_users.len(), 1);
}

// ---- Hashing ----

#[test]
fn hash_round_trip() {
    let hash = auth::hash_password("pass1234").unwrap();
    assert!(hash.starts_with("$argon2id$"));
    assert!(auth::verify_password("pass1234", &hash).unwrap());
    assert!(!auth::verify_password("wrong", &hash).unwrap());
}
