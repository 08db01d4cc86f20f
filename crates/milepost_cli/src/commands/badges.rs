//! Badge and stats command implementations.

use super::{require_session, Coordinator};

/// Runs the badges command.
pub fn badges(coordinator: &Coordinator) -> Result<(), Box<dyn std::error::Error>> {
    let user = require_session(coordinator)?;
    let badges = coordinator.badges_for_user(&user.id);

    if badges.is_empty() {
        println!("No badges yet - record your first milestone to unlock one.");
        return Ok(());
    }

    for badge in &badges {
        println!("{}  {} [{}]", badge.icon, badge.name, badge.rarity);
        println!("    {}", badge.description);
        if let Some(unlocked_at) = &badge.unlocked_at {
            println!("    unlocked {unlocked_at}");
        }
    }
    Ok(())
}

/// Runs the stats command.
pub fn stats(coordinator: &Coordinator) -> Result<(), Box<dyn std::error::Error>> {
    let user = require_session(coordinator)?;
    let stats = coordinator.stats_for_user(&user.id);

    println!("Milestones:      {}", stats.total_entries);
    println!("Badges:          {}", stats.total_badges);
    println!("Current streak:  {} day(s)", stats.current_streak);
    println!("Member since:    {}", stats.joined_at);
    if !stats.categories.is_empty() {
        println!("By category:");
        for (category, count) in &stats.categories {
            println!("    {category}: {count}");
        }
    }
    Ok(())
}
