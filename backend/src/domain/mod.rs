//! Domain primitives, services and ports.
//!
//! Purpose: define the strongly typed values shared by the tracker and the
//! user directory, the emissions calculator, and the services that implement
//! the driving ports. Keep types transport agnostic and document invariants
//! and serialisation contracts in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - TraceId: request-scoped correlation identifier.
//! - UserId, UserRecord, UserProfile, Registration, UserUpdate: directory data.
//! - TransportLeg, WasteEntry, MeterReadings, EmissionsBreakdown: calculator.
//! - FootprintSubmission, FootprintRecord, DashboardPoint, CategoryPoint.
//! - LeaderboardEntry, LeaderboardCredit.
//! - Services implementing the driving ports in [`ports`].

pub mod emissions;
pub mod error;
pub mod footprint;
pub mod history_service;
pub mod leaderboard;
pub mod leaderboard_service;
pub mod ports;
pub mod profile_service;
pub mod submission_service;
pub mod trace_id;
pub mod user;
pub mod user_directory_service;

pub use self::emissions::{
    DURATION_DIVISOR, ELECTRICITY_FACTOR, EmissionsBreakdown, MeterReadings, TransportLeg,
    TransportMode, WASTE_FACTOR, WasteEntry,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::footprint::{
    Category, CategoryPoint, DASHBOARD_LIMIT, DashboardPoint, FootprintRecord,
    FootprintSubmission, FootprintValidationError, HISTORY_DATE_FORMAT, NewFootprint,
    SubmissionReceipt,
};
pub use self::history_service::FootprintHistoryService;
pub use self::leaderboard::{LeaderboardCredit, LeaderboardEntry, rank};
pub use self::leaderboard_service::LeaderboardService;
pub use self::profile_service::UserProfileService;
pub use self::submission_service::FootprintSubmissionService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    LABEL_MAX, NewUser, PASSWORD_MIN, Registration, Role, UserId, UserProfile, UserRecord,
    UserUpdate, UserValidationError, validate_label,
};
pub use self::user_directory_service::UserDirectoryService;
