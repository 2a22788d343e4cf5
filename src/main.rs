use anyhow::Result;

use admin_reset::config::ToolConfig;
use admin_reset::{ops, prompt, ui};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = ToolConfig::from_env();

    ui::print_header(&config);
    if let Err(e) = ops::show_database_info(&config) {
        eprintln!("Error reading database: {e}");
    }

    // Main program loop: one operation runs to completion per pass.
    // Options 1-3 end the process on success and loop back on cancellation;
    // unexpected errors are reported and the menu shown again.
    loop {
        ui::main_menu();
        match prompt::prompt_input() {
            Some(choice) => match choice.trim() {
                "1" => match ops::full_reset(&config) {
                    Ok(true) => break,
                    Ok(false) => {}
                    Err(e) => eprintln!("Reset failed: {e}"),
                },

                "2" => match ops::reset_admin_password(&config) {
                    Ok(true) => break,
                    Ok(false) => {}
                    Err(e) => eprintln!("Password reset failed: {e}"),
                },

                "3" => match ops::add_admin(&config) {
                    Ok(true) => break,
                    Ok(false) => {}
                    Err(e) => eprintln!("Failed to create new admin: {e}"),
                },

                "4" => {
                    if let Err(e) = ops::show_database_info(&config) {
                        eprintln!("Error reading database: {e}");
                    }
                    prompt::wait_for_enter();
                }

                "5" => {
                    println!("Goodbye!");
                    break;
                }

                _ => println!("Invalid choice. Please enter 1-5.\n"),
            },
            None => {
                println!("End of input detected. Exiting...");
                break;
            }
        }
    }

    Ok(())
}
