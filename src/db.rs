use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

/// Row from the application's `user` table (the columns this tool reads).
#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: i64,
}

#[derive(Debug, Clone)]
pub struct AdminRow {
    pub name: String,
    pub email: String,
    pub created_at: i64,
}

/// Read-only snapshot shown on startup and by the info option.
#[derive(Debug)]
pub struct DbSummary {
    pub user_count: i64,
    pub first_user: Option<UserRow>,
    pub admin_users: Vec<AdminRow>,
}

/// Fields for a freshly provisioned admin account. One id is shared by
/// the `auth` and `user` rows.
#[derive(Debug)]
pub struct NewAdmin {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: i64,
}

// Converts the application's unix-second timestamps into local time for display.
pub fn format_timestamp(secs: i64) -> String {
    match DateTime::from_timestamp(secs, 0) {
        Some(dt) => dt
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        None => "unknown".to_string(),
    }
}

/// Open the application database. `Connection::open` would silently create
/// an empty file, so a missing database is rejected here first.
pub fn open(db_path: &Path) -> Result<Connection> {
    if !db_path.exists() {
        bail!("database not found at {}", db_path.display());
    }
    Connection::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))
}

pub fn user_count(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM user", [], |r| r.get(0))
        .context("Failed to count users")
}

/// Earliest-created user. The application treats this account as the
/// primary admin, an ordering convention this tool follows but does not own.
pub fn first_user(conn: &Connection) -> Result<Option<UserRow>> {
    conn.query_row(
        "SELECT id, name, email, role, created_at FROM user ORDER BY created_at ASC LIMIT 1",
        [],
        |r| {
            Ok(UserRow {
                id: r.get(0)?,
                name: r.get(1)?,
                email: r.get(2)?,
                role: r.get(3)?,
                created_at: r.get(4)?,
            })
        },
    )
    .optional()
    .context("Failed to read first user")
}

pub fn admin_users(conn: &Connection) -> Result<Vec<AdminRow>> {
    let mut stmt = conn
        .prepare("SELECT name, email, created_at FROM user WHERE role = 'admin' ORDER BY created_at ASC")
        .context("Failed to prepare admin list query")?;
    let rows = stmt
        .query_map([], |r| {
            Ok(AdminRow {
                name: r.get(0)?,
                email: r.get(1)?,
                created_at: r.get(2)?,
            })
        })
        .context("Failed to query admin users")?;
    let mut admins = Vec::new();
    for row in rows {
        admins.push(row?);
    }
    Ok(admins)
}

pub fn summarize(conn: &Connection) -> Result<DbSummary> {
    Ok(DbSummary {
        user_count: user_count(conn)?,
        first_user: first_user(conn)?,
        admin_users: admin_users(conn)?,
    })
}

// Email uniqueness is checked against the user table before provisioning.
pub fn email_exists(conn: &Connection, email: &str) -> Result<bool> {
    let row: Option<String> = conn
        .query_row(
            "SELECT id FROM user WHERE email = ?1",
            params![email],
            |r| r.get(0),
        )
        .optional()
        .context("Failed to check for existing email")?;
    Ok(row.is_some())
}

/// Overwrite the stored password hash for one credential record.
/// Returns the number of rows changed; the caller decides whether zero is an error.
pub fn update_auth_password(conn: &Connection, user_id: &str, password_hash: &str) -> Result<usize> {
    conn.execute(
        "UPDATE auth SET password = ?1 WHERE id = ?2",
        params![password_hash, user_id],
    )
    .context("Failed to update credential record")
}

/// Insert the credential and user rows for a new admin account.
/// Both land in one transaction so a failed second insert leaves nothing behind.
pub fn insert_admin(conn: &mut Connection, admin: &NewAdmin) -> Result<()> {
    let tx = conn.transaction().context("Failed to start transaction")?;
    tx.execute(
        "INSERT INTO auth (id, email, password, active) VALUES (?1, ?2, ?3, 1)",
        params![admin.id, admin.email, admin.password_hash],
    )
    .context("Failed to insert credential record")?;
    tx.execute(
        "INSERT INTO user (id, name, email, role, profile_image_url,
                           last_active_at, updated_at, created_at,
                           api_key, settings, info, oauth_sub)
         VALUES (?1, ?2, ?3, 'admin', '/user.png', ?4, ?4, ?4, NULL, NULL, NULL, NULL)",
        params![admin.id, admin.name, admin.email, admin.created_at],
    )
    .context("Failed to insert user record")?;
    tx.commit().context("Failed to commit transaction")?;
    Ok(())
}
