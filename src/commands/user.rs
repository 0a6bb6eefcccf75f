//! `linkcheck user` - administer the user directory from the shell.

use anyhow::{bail, Result};
use colored::Colorize;
use std::path::Path;

use crate::config::Config;
use crate::fs::{FileUserDirectory, Plan, UserDirectory, UserRecord};

fn directory(config_path: Option<&Path>) -> Result<FileUserDirectory> {
    let config = Config::load(config_path)?;
    super::prepare_data_dir(&config)?;
    Ok(FileUserDirectory::new(&config.data_dir))
}

pub fn add(config_path: Option<&Path>, user_id: i64, plan: Plan) -> Result<()> {
    let users = directory(config_path)?;
    let (_, created) = users.register(user_id, None)?;
    users.modify(user_id, &move |u: &mut UserRecord| u.plan = plan)?;
    let verb = if created { "Added" } else { "Updated" };
    println!("{} {} user {} ({})", "✓".green(), verb, user_id.to_string().cyan(), plan);
    Ok(())
}

pub fn set_banned(config_path: Option<&Path>, user_id: i64, banned: bool) -> Result<()> {
    let users = directory(config_path)?;
    if users.modify(user_id, &move |u: &mut UserRecord| u.banned = banned)?.is_none() {
        bail!("User {user_id} not found");
    }
    let action = if banned { "Banned" } else { "Unbanned" };
    println!("{} {} user {}", "✓".green(), action, user_id.to_string().cyan());
    Ok(())
}

pub fn set_plan(config_path: Option<&Path>, user_id: i64, plan: Plan) -> Result<()> {
    let users = directory(config_path)?;
    if users.modify(user_id, &move |u: &mut UserRecord| u.plan = plan)?.is_none() {
        bail!("User {user_id} not found");
    }
    println!("{} User {} is now on the {} plan", "✓".green(), user_id.to_string().cyan(), plan);
    Ok(())
}

pub fn list(config_path: Option<&Path>) -> Result<()> {
    let users = directory(config_path)?.list()?;
    if users.is_empty() {
        println!("{}", "No users registered".dimmed());
        return Ok(());
    }
    for user in users {
        let name = user.username.as_deref().unwrap_or("-");
        let status = if user.banned {
            "banned".red().to_string()
        } else {
            "active".green().to_string()
        };
        println!(
            "{:>14}  {:<20} {:<8} {}  {}",
            user.id.to_string().cyan(),
            name,
            user.plan.to_string(),
            status,
            user.registered_at.format("%Y-%m-%d").to_string().dimmed()
        );
    }
    Ok(())
}
