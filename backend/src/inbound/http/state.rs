//! Shared HTTP adapter state.
//!
//! HTTP handlers accept these states via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FootprintHistoryQuery, FootprintSubmissionCommand, LeaderboardQuery, UserDirectoryCommand,
    UserDirectoryQuery, UserProfileQuery,
};

/// Dependency bundle for the carbon-track handlers.
#[derive(Clone)]
pub struct TrackerState {
    pub submissions: Arc<dyn FootprintSubmissionCommand>,
    pub history: Arc<dyn FootprintHistoryQuery>,
    pub leaderboard: Arc<dyn LeaderboardQuery>,
    pub profiles: Arc<dyn UserProfileQuery>,
}

impl TrackerState {
    pub fn new(
        submissions: Arc<dyn FootprintSubmissionCommand>,
        history: Arc<dyn FootprintHistoryQuery>,
        leaderboard: Arc<dyn LeaderboardQuery>,
        profiles: Arc<dyn UserProfileQuery>,
    ) -> Self {
        Self {
            submissions,
            history,
            leaderboard,
            profiles,
        }
    }
}

/// Dependency bundle for the user-directory handlers.
#[derive(Clone)]
pub struct DirectoryState {
    pub commands: Arc<dyn UserDirectoryCommand>,
    pub queries: Arc<dyn UserDirectoryQuery>,
}

impl DirectoryState {
    pub fn new(commands: Arc<dyn UserDirectoryCommand>, queries: Arc<dyn UserDirectoryQuery>) -> Self {
        Self { commands, queries }
    }
}
