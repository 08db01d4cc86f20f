//! CLI command implementations.

pub mod badges;
pub mod entry;
pub mod login;
pub mod profile;
pub mod register;

use milepost_model::User;
use milepost_remote::RemoteStore;
use milepost_store::FileBackend;
use milepost_sync::SyncCoordinator;

/// The coordinator the CLI drives: file-backed local store, env-configured
/// remote.
pub type Coordinator = SyncCoordinator<Box<dyn RemoteStore>, FileBackend>;

/// Returns the logged-in user or a friendly error.
pub fn require_session(coordinator: &Coordinator) -> Result<User, Box<dyn std::error::Error>> {
    coordinator
        .current_user()
        .ok_or_else(|| "Not logged in. Run `milepost login` first.".into())
}
