//! Register command implementation.

use super::Coordinator;
use milepost_model::User;

/// Runs the register command.
///
/// The duplicate check happens here, before the create: the coordinator
/// exposes `lookup_user` and the caller decides what a collision means.
pub fn run(
    coordinator: &Coordinator,
    username: &str,
    email: &str,
    password: &str,
    full_name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if coordinator.lookup_user(email).is_some() {
        return Err(format!("An account already exists for {email}").into());
    }
    if coordinator.lookup_user(username).is_some() {
        return Err(format!("The username {username} is taken").into());
    }

    let user = User::new(username, email, password, full_name);
    let created = coordinator.create_user(user)?;
    coordinator.set_current_user(&created.record)?;

    if created.is_cloud_backed() {
        println!("Account created for {} (synced to cloud).", created.record.username);
    } else {
        println!(
            "Account created for {} (this device only; will not sync until the service is reachable).",
            created.record.username
        );
    }
    Ok(())
}
