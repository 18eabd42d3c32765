//! Users command - account administration.

use std::sync::Arc;

use crate::cli::args::{UsersAction, UsersArgs};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Database, Persistence};
use crate::services::{UserManager, UserService};

/// Execute the users command
pub async fn execute(args: UsersArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let users = UserManager::new(Arc::new(Persistence::new(db.get_connection())));

    match args.action {
        UsersAction::Promote { username } => {
            let user = users.promote_to_admin(&username).await?;
            println!("{} is now {}", user.username, user.role);
        }
    }

    Ok(())
}
