mod active_branches;
mod error;
mod message;
mod repository_path;
mod trigger;

pub use self::active_branches::{ActiveBranches, ACTIVE_BRANCHES_DELIMITER};
pub use self::error::BuildError;
pub use self::message::{shorten_branch, shorten_commit, BuildMessage, SSH_CLONE_URL_PREFIX};
pub use self::repository_path::RepositoryPath;
pub use self::trigger::BuildTrigger;
