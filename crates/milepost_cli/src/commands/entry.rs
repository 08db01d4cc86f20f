//! Entry commands: record a milestone, list milestones.

use super::{require_session, Coordinator};
use milepost_model::{Entry, UserPatch, UserStats};

/// Runs the log command.
pub fn log(
    coordinator: &Coordinator,
    title: &str,
    description: &str,
    category: &str,
    date: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let user = require_session(coordinator)?;
    let date = date.unwrap_or_else(|| chrono::Utc::now().date_naive().to_string());

    let entry = Entry::new(&user.id, title, description, category, &date);
    let recorded = coordinator.create_entry(entry)?;

    // Refresh the user's counters from the authoritative entry list.
    let entries = coordinator.entries_for_user(&user.id);
    let stats = UserStats::compute(&entries);
    let patch = UserPatch::new().with_progress(
        stats.total_entries,
        stats.total_badges,
        stats.current_streak,
        date,
    );
    coordinator.update_user(&user.id, &patch)?;

    if recorded.is_cloud_backed() {
        println!("Recorded \"{}\" ({}).", recorded.record.title, recorded.record.category);
    } else {
        println!(
            "Recorded \"{}\" ({}) on this device only.",
            recorded.record.title, recorded.record.category
        );
    }
    println!("Total milestones: {}", stats.total_entries);
    Ok(())
}

/// Runs the entries command.
pub fn list(coordinator: &Coordinator) -> Result<(), Box<dyn std::error::Error>> {
    let user = require_session(coordinator)?;
    let entries = coordinator.entries_for_user(&user.id);

    if entries.is_empty() {
        println!("No milestones recorded yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}  [{}]  {}", entry.date, entry.category, entry.title);
        if !entry.description.is_empty() {
            println!("            {}", entry.description);
        }
    }
    println!("{} milestone(s).", entries.len());
    Ok(())
}
