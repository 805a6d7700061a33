//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`SubmissionLedger`], [`UserDirectory`],
//! [`CredentialHasher`]) are implemented by outbound adapters. Driving ports
//! (`*Query`, `*Command`) are implemented by domain services and consumed by
//! inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod credential_hasher;
mod footprint_history_query;
mod footprint_repository;
mod footprint_submission;
mod leaderboard_query;
mod leaderboard_repository;
mod submission_ledger;
mod user_directory;
mod user_directory_command;
mod user_directory_query;
mod user_profile_query;
mod user_repository;

#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHashError, CredentialHasher};
#[cfg(test)]
pub use footprint_history_query::MockFootprintHistoryQuery;
pub use footprint_history_query::FootprintHistoryQuery;
#[cfg(test)]
pub use footprint_repository::MockFootprintRepository;
pub use footprint_repository::{FootprintRepository, FootprintRepositoryError};
#[cfg(test)]
pub use footprint_submission::MockFootprintSubmissionCommand;
pub use footprint_submission::FootprintSubmissionCommand;
#[cfg(test)]
pub use leaderboard_query::MockLeaderboardQuery;
pub use leaderboard_query::LeaderboardQuery;
#[cfg(test)]
pub use leaderboard_repository::MockLeaderboardRepository;
pub use leaderboard_repository::{LeaderboardRepository, LeaderboardRepositoryError};
#[cfg(test)]
pub use submission_ledger::MockSubmissionLedger;
pub use submission_ledger::{SubmissionLedger, SubmissionLedgerError};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub(crate) use user_directory::map_user_directory_error;
pub use user_directory::{UserDirectory, UserDirectoryError};
#[cfg(test)]
pub use user_directory_command::MockUserDirectoryCommand;
pub use user_directory_command::UserDirectoryCommand;
#[cfg(test)]
pub use user_directory_query::MockUserDirectoryQuery;
pub use user_directory_query::UserDirectoryQuery;
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::UserProfileQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
