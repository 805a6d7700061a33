//! Concurrent submissions for one user must both be credited.
//!
//! The directory total and the leaderboard row are read-modify-write
//! aggregates; two overlapping submissions of 5.0 and 7.0 must leave both at
//! the prior value plus 12.0.

use carbon_backend::domain::{
    FootprintSubmission, MeterReadings, Registration, TransportLeg, UserId,
};
use carbon_backend::server::{
    TrackerDirectory, build_tracker_state, in_process_directory_state,
};
use rstest::rstest;

fn submission(user_id: UserId, distance: f64) -> FootprintSubmission {
    let meters = MeterReadings::try_new(0.0, 0.0).expect("valid meters");
    let leg = TransportLeg::try_new("car", distance, 0.0).expect("valid leg");
    FootprintSubmission::try_new(user_id, "Asha", "Pune", meters)
        .expect("valid submission")
        .with_legs(vec![leg])
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[rstest]
#[tokio::test]
async fn overlapping_submissions_are_both_credited() {
    let directory = TrackerDirectory::in_process();
    let tracker = build_tracker_state(None, &directory);
    let users = in_process_directory_state(&directory).expect("in-process directory");

    let registration =
        Registration::try_from_parts("Asha", "asha@example.com", "Pune", "open sesame", "open sesame")
            .expect("valid registration");
    let user = users
        .commands
        .register(registration)
        .await
        .expect("registration succeeds");
    let user = users
        .commands
        .credit(user.id, 3.0)
        .await
        .expect("seed credit succeeds");
    let prior = user.total_carbon_footprint;

    let (first, second) = tokio::join!(
        tracker.submissions.submit(submission(user.id, 25.0)),
        tracker.submissions.submit(submission(user.id, 35.0)),
    );
    assert_close(first.expect("first submission").breakdown.total, 5.0);
    assert_close(second.expect("second submission").breakdown.total, 7.0);

    let profile = tracker
        .profiles
        .profile(user.id)
        .await
        .expect("profile exists");
    assert_close(profile.total_carbon_footprint, prior + 12.0);

    let board = tracker
        .leaderboard
        .for_city("Pune")
        .await
        .expect("leaderboard exists");
    assert_eq!(board.len(), 1);
    assert_close(board[0].total_carbon_footprint, 12.0);

    let records = tracker
        .history
        .list_footprints()
        .await
        .expect("footprints listed");
    assert_eq!(records.len(), 2);
}
