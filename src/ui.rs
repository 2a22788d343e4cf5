use colored::*;

use crate::config::ToolConfig;
use crate::db::{self, DbSummary};

pub fn print_header(config: &ToolConfig) {
    let bar_color = Color::BrightBlue;
    let label_color = Color::BrightCyan;
    let bar = "=".repeat(60);

    println!("{}", bar.color(bar_color));
    println!(
        "{}{}",
        " ".repeat(14),
        "WEB UI ADMIN MAINTENANCE TOOL".bold().color(Color::BrightYellow)
    );
    println!("{}", bar.color(bar_color));
    println!(
        "{} {}",
        "Data directory:".color(label_color),
        config.data_dir.display()
    );
    println!(
        "{} {}",
        "Database:      ".color(label_color),
        config.db_path.display()
    );
    println!("{}", bar.color(bar_color));
    println!();
}

pub fn main_menu() {
    let text_color = Color::White;

    println!();
    println!("{}", "Choose maintenance option:".bold().color(Color::BrightYellow));
    println!("  {}", "[1] Complete reset (DELETE ALL DATA)".color(text_color));
    println!("  {}", "[2] Reset admin password (keep all data)".color(text_color));
    println!("  {}", "[3] Add new admin user (keep all data)".color(text_color));
    println!("  {}", "[4] Show database info".color(text_color));
    println!("  {}", "[5] Exit".color(Color::Red));
    println!();
    print!("{}", "Select an option [1-5]: ".bold().color(Color::Cyan));
}

/// Render the read-only database summary.
pub fn print_summary(summary: &DbSummary) {
    println!("{}", "Current Database Status:".bold().color(Color::BrightYellow));
    println!("  Total users: {}", summary.user_count);

    if let Some(first) = &summary.first_user {
        println!(
            "  First user (primary admin): {} ({})",
            first.name, first.email
        );
    }

    if !summary.admin_users.is_empty() {
        println!("  Admin users ({}):", summary.admin_users.len());
        for admin in &summary.admin_users {
            println!(
                "   - {} ({}) - created: {}",
                admin.name,
                admin.email,
                db::format_timestamp(admin.created_at)
            );
        }
    }
    println!();
}
