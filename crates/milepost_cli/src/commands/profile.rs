//! Profile command implementation.

use super::{require_session, Coordinator};
use milepost_model::UserPatch;

/// Runs the profile command.
pub fn run(
    coordinator: &Coordinator,
    full_name: Option<String>,
    password: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let user = require_session(coordinator)?;

    let mut patch = UserPatch::new();
    if let Some(full_name) = full_name {
        patch = patch.with_full_name(full_name);
    }
    if let Some(password) = password {
        patch = patch.with_password(password);
    }
    if patch.is_empty() {
        return Err("Nothing to update. Pass --full-name or --password.".into());
    }

    match coordinator.update_user(&user.id, &patch)? {
        Some(updated) => {
            if updated.is_cloud_backed() {
                println!("Profile updated.");
            } else {
                println!("Profile updated on this device only.");
            }
            Ok(())
        }
        None => Err("Account record not found.".into()),
    }
}
