//! Builders wiring adapters into the HTTP states.
//!
//! With a database pool the Diesel adapters are used; otherwise in-memory
//! stores stand in so either service runs locally without PostgreSQL.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::domain::ports::{
    CredentialHasher, FootprintRepository, LeaderboardRepository, SubmissionLedger, UserDirectory,
    UserRepository,
};
use crate::domain::{
    FootprintHistoryService, FootprintSubmissionService, LeaderboardService, UserDirectoryService,
    UserProfileService,
};
use crate::inbound::http::state::{DirectoryState, TrackerState};
use crate::outbound::credentials::Argon2CredentialHasher;
use crate::outbound::memory::{InMemoryCarbonStore, InMemoryUserStore};
use crate::outbound::persistence::{
    DbPool, DieselFootprintRepository, DieselLeaderboardRepository, DieselSubmissionLedger,
    DieselUserRepository,
};
use crate::outbound::user_directory::UserDirectoryHttpClient;

/// Where the tracker looks users up.
#[derive(Clone)]
pub enum TrackerDirectory {
    /// The remote user-directory service.
    Remote(UserDirectoryHttpClient),
    /// A directory living in the tracker process; its endpoints are mounted
    /// on the tracker app as well.
    InProcess(Arc<InMemoryUserStore>),
}

impl TrackerDirectory {
    /// A fresh in-process directory.
    pub fn in_process() -> Self {
        Self::InProcess(Arc::new(InMemoryUserStore::default()))
    }
}

fn tracker_state<D, L, F, B>(
    directory: Arc<D>,
    ledger: Arc<L>,
    footprints: Arc<F>,
    leaderboard: Arc<B>,
    clock: Arc<dyn Clock>,
) -> TrackerState
where
    D: UserDirectory + 'static,
    L: SubmissionLedger + 'static,
    F: FootprintRepository + 'static,
    B: LeaderboardRepository + 'static,
{
    TrackerState::new(
        Arc::new(FootprintSubmissionService::new(
            Arc::clone(&directory),
            ledger,
            clock,
        )),
        Arc::new(FootprintHistoryService::new(footprints, Arc::clone(&directory))),
        Arc::new(LeaderboardService::new(leaderboard)),
        Arc::new(UserProfileService::new(directory)),
    )
}

fn tracker_state_with<D>(db_pool: Option<&DbPool>, directory: Arc<D>, clock: Arc<dyn Clock>) -> TrackerState
where
    D: UserDirectory + 'static,
{
    match db_pool {
        Some(pool) => tracker_state(
            directory,
            Arc::new(DieselSubmissionLedger::new(pool.clone())),
            Arc::new(DieselFootprintRepository::new(pool.clone())),
            Arc::new(DieselLeaderboardRepository::new(pool.clone())),
            clock,
        ),
        None => {
            let store = Arc::new(InMemoryCarbonStore::new());
            tracker_state(
                directory,
                Arc::clone(&store),
                Arc::clone(&store),
                store,
                clock,
            )
        }
    }
}

/// Build the carbon-track state for the configured storage and directory.
pub fn build_tracker_state(db_pool: Option<&DbPool>, directory: &TrackerDirectory) -> TrackerState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    match directory {
        TrackerDirectory::Remote(client) => {
            tracker_state_with(db_pool, Arc::new(client.clone()), clock)
        }
        TrackerDirectory::InProcess(store) => tracker_state_with(db_pool, Arc::clone(store), clock),
    }
}

fn directory_state<R, H>(users: Arc<R>, hasher: Arc<H>) -> DirectoryState
where
    R: UserRepository + 'static,
    H: CredentialHasher + 'static,
{
    let service = Arc::new(UserDirectoryService::new(users, hasher));
    DirectoryState::new(service.clone(), service)
}

/// Build the user-directory state, backed by PostgreSQL when a pool exists.
pub fn build_directory_state(db_pool: Option<&DbPool>) -> DirectoryState {
    let hasher = Arc::new(Argon2CredentialHasher::new());
    match db_pool {
        Some(pool) => directory_state(Arc::new(DieselUserRepository::new(pool.clone())), hasher),
        None => directory_state(Arc::new(InMemoryUserStore::default()), hasher),
    }
}

/// Directory state sharing the tracker's in-process store, if it has one.
pub fn in_process_directory_state(directory: &TrackerDirectory) -> Option<DirectoryState> {
    match directory {
        TrackerDirectory::Remote(_) => None,
        TrackerDirectory::InProcess(store) => Some(directory_state(
            Arc::clone(store),
            Arc::new(Argon2CredentialHasher::new()),
        )),
    }
}
