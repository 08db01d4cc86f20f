//! Login and logout command implementations.

use super::Coordinator;

/// Runs the login command.
///
/// `None` from the coordinator means invalid credentials - the caller
/// cannot tell which store answered, by design.
pub fn run(
    coordinator: &Coordinator,
    identifier: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match coordinator.login_user(identifier, password) {
        Some(user) => {
            println!("Logged in as {} ({}).", user.username, user.email);
            Ok(())
        }
        None => Err("Invalid credentials.".into()),
    }
}

/// Runs the logout command.
pub fn logout(coordinator: &Coordinator) -> Result<(), Box<dyn std::error::Error>> {
    coordinator.logout()?;
    println!("Logged out.");
    Ok(())
}
