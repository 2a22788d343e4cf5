use anyhow::{Context, Result, bail};
use chrono::Utc;
use colored::*;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::config::ToolConfig;
use crate::{auth, backup, db, logger, prompt, ui};

/// Exact phrase an operator must type before the full reset runs.
pub const CONFIRM_PHRASE: &str = "DELETE ALL DATA";

/// Minimum length the web application accepts for account passwords.
pub const MIN_PASSWORD_LEN: usize = 4;

/*------------------------ Input validation ------------------------*/
// Each check runs before any backup or write; a failure means zero mutation.

pub fn check_new_password(password: &str, confirm: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        bail!("Password must be at least {MIN_PASSWORD_LEN} characters long");
    }
    if password != confirm {
        bail!("Passwords don't match");
    }
    Ok(())
}

pub fn check_email(email: &str) -> Result<()> {
    if email.is_empty() || !email.contains('@') {
        bail!("Invalid email address");
    }
    Ok(())
}

pub fn check_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("Name cannot be empty");
    }
    Ok(())
}

/// Case- and content-sensitive match against the confirmation phrase.
pub fn confirmation_matches(input: &str) -> bool {
    input == CONFIRM_PHRASE
}

/*------------------------ Option 1: full reset ------------------------*/

pub struct ResetOutcome {
    pub backup_path: PathBuf,
}

/// Backup then delete the database file. The delete only runs once the
/// copy has succeeded; a failed delete leaves the backup in place.
pub fn perform_full_reset(config: &ToolConfig) -> Result<ResetOutcome> {
    let backup_path = backup::create_backup(config)?;
    fs::remove_file(&config.db_path)
        .with_context(|| format!("Failed to delete {}", config.db_path.display()))?;
    logger::log_event(
        config,
        "FULL_RESET",
        &format!("database deleted, backup at {}", backup_path.display()),
    )
    .ok();
    Ok(ResetOutcome { backup_path })
}

/// Interactive wrapper. `Ok(true)` means the operation completed and the
/// menu loop should terminate; `Ok(false)` returns to the menu.
pub fn full_reset(config: &ToolConfig) -> Result<bool> {
    println!("{}", "OPTION 1: Complete Database Reset".bold().color(Color::Red));
    println!(
        "{}",
        "WARNING: This will DELETE ALL data (users, chats, settings).".color(Color::Yellow)
    );
    println!(
        "{}",
        "WARNING: Stop the web application before continuing.".color(Color::Yellow)
    );
    println!(
        "{}",
        "The first account registered after the reset becomes admin.".color(Color::Yellow)
    );
    println!();

    print!("Type '{CONFIRM_PHRASE}' to confirm: ");
    let Some(input) = prompt::prompt_exact() else {
        println!("Reset cancelled.");
        return Ok(false);
    };
    if !confirmation_matches(&input) {
        println!("{}", "Reset cancelled.".color(Color::Red));
        return Ok(false);
    }

    if !config.database_exists() {
        println!("Database already doesn't exist; nothing to delete.");
        return Ok(true);
    }

    let outcome = perform_full_reset(config)?;
    println!("Backup saved to {}", outcome.backup_path.display());
    println!("{}", "Database deleted successfully.".color(Color::Green));
    println!("Next startup will create a fresh database.");
    println!("First user to register will become admin.");
    Ok(true)
}

/*------------------------ Option 2: password reset ------------------------*/

/// Backup, hash, and overwrite the credential record for `user_id`.
pub fn perform_password_reset(config: &ToolConfig, user_id: &str, new_password: &str) -> Result<()> {
    backup::create_backup(config)?;
    let hashed = auth::hash_password(new_password)?;
    let conn = db::open(&config.db_path)?;
    let changed = db::update_auth_password(&conn, user_id, &hashed)?;
    if changed == 0 {
        bail!("no credential record found for user {user_id}");
    }
    logger::log_event(
        config,
        "PASSWORD_RESET",
        &format!("credential updated for user {user_id}"),
    )
    .ok();
    Ok(())
}

pub fn reset_admin_password(config: &ToolConfig) -> Result<bool> {
    println!("{}", "OPTION 2: Reset Admin Password".bold().color(Color::Cyan));
    println!("This resets the password of the first user (primary admin).");
    println!();

    if !config.database_exists() {
        println!("{}", "No database found.".color(Color::Red));
        return Ok(false);
    }

    let first = {
        let conn = db::open(&config.db_path)?;
        db::first_user(&conn)?
    };
    let Some(first) = first else {
        println!("{}", "No users found in database.".color(Color::Red));
        return Ok(false);
    };

    println!("Primary admin: {} ({})", first.name, first.email);
    println!();

    let mut new_password = prompt::prompt_password("Enter new password for admin: ")?;
    let mut confirm = prompt::prompt_password("Confirm new password: ")?;
    if let Err(e) = check_new_password(&new_password, &confirm) {
        println!("{}", e.to_string().color(Color::Red));
        new_password.zeroize();
        confirm.zeroize();
        return Ok(false);
    }

    perform_password_reset(config, &first.id, &new_password)?;
    new_password.zeroize();
    confirm.zeroize();

    println!("{}", "Admin password reset successfully.".color(Color::Green));
    println!("You can now log in with:");
    println!("  Email: {}", first.email);
    Ok(true)
}

/*------------------------ Option 3: add admin ------------------------*/

/// Collision-check, backup, then insert the credential and user rows.
/// Returns the generated account id.
pub fn perform_add_admin(
    config: &ToolConfig,
    email: &str,
    name: &str,
    password: &str,
) -> Result<String> {
    {
        let conn = db::open(&config.db_path)?;
        if db::email_exists(&conn, email)? {
            bail!("user with email {email} already exists");
        }
    }

    backup::create_backup(config)?;

    let admin = db::NewAdmin {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        email: email.to_string(),
        password_hash: auth::hash_password(password)?,
        created_at: Utc::now().timestamp(),
    };
    let mut conn = db::open(&config.db_path)?;
    db::insert_admin(&mut conn, &admin)?;
    logger::log_event(
        config,
        "ADMIN_CREATED",
        &format!("new admin {} ({})", admin.email, admin.id),
    )
    .ok();
    Ok(admin.id)
}

pub fn add_admin(config: &ToolConfig) -> Result<bool> {
    println!("{}", "OPTION 3: Add New Admin User".bold().color(Color::Cyan));
    println!("This creates a new admin user alongside existing users.");
    println!();

    if !config.database_exists() {
        println!(
            "{}",
            "No database found. Start the application once to create it.".color(Color::Red)
        );
        return Ok(false);
    }

    let Some(email) = prompt::prompt_line("Enter email for new admin: ") else {
        return Ok(false);
    };
    let email = email.trim().to_lowercase();
    if let Err(e) = check_email(&email) {
        println!("{}", e.to_string().color(Color::Red));
        return Ok(false);
    }

    let Some(name) = prompt::prompt_line("Enter name for new admin: ") else {
        return Ok(false);
    };
    let name = name.trim().to_string();
    if let Err(e) = check_name(&name) {
        println!("{}", e.to_string().color(Color::Red));
        return Ok(false);
    }

    let mut password = prompt::prompt_password("Enter password for new admin: ")?;
    let mut confirm = prompt::prompt_password("Confirm password: ")?;
    if let Err(e) = check_new_password(&password, &confirm) {
        println!("{}", e.to_string().color(Color::Red));
        password.zeroize();
        confirm.zeroize();
        return Ok(false);
    }

    // Collision is a cancellation, not a hard error: report and return to the menu.
    {
        let conn = db::open(&config.db_path)?;
        if db::email_exists(&conn, &email)? {
            println!(
                "{}",
                format!("User with email {email} already exists.").color(Color::Red)
            );
            password.zeroize();
            confirm.zeroize();
            return Ok(false);
        }
    }

    let result = perform_add_admin(config, &email, &name, &password);
    password.zeroize();
    confirm.zeroize();
    result?;

    println!("{}", "New admin user created successfully.".color(Color::Green));
    println!("Login credentials:");
    println!("  Email: {email}");
    println!("  Name:  {name}");
    println!("  Role:  admin");
    Ok(true)
}

/*------------------------ Option 4: database info ------------------------*/

pub fn show_database_info(config: &ToolConfig) -> Result<()> {
    if !config.database_exists() {
        println!("Database not found or empty.\n");
        return Ok(());
    }
    let conn = db::open(&config.db_path)?;
    let summary = db::summarize(&conn)?;
    ui::print_summary(&summary);
    Ok(())
}
