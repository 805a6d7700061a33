//! Static checks over the embedded migration SQL.
//!
//! Aggregate writes rely on the unique email constraint and the leaderboard
//! primary key; these tests catch edits that silently drop either.

use rstest::rstest;

const UP: &str = include_str!("../migrations/2026-10-01-000000_create_carbon_tables/up.sql");
const DOWN: &str = include_str!("../migrations/2026-10-01-000000_create_carbon_tables/down.sql");

fn normalised(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[rstest]
#[case("CREATE TABLE users (")]
#[case("CREATE TABLE footprints (")]
#[case("CREATE TABLE leaderboard (")]
fn up_creates_every_table(#[case] statement: &str) {
    assert!(normalised(UP).contains(statement), "missing {statement}");
}

#[rstest]
fn email_uniqueness_is_enforced() {
    assert!(normalised(UP).contains("CONSTRAINT users_email_key UNIQUE (email)"));
}

#[rstest]
fn leaderboard_is_keyed_by_user() {
    assert!(normalised(UP).contains("user_id BIGINT PRIMARY KEY"));
}

#[rstest]
#[case("users")]
#[case("footprints")]
#[case("leaderboard")]
fn down_drops_every_table(#[case] table: &str) {
    assert!(
        normalised(DOWN).contains(&format!("DROP TABLE IF EXISTS {table}")),
        "down.sql should drop {table}"
    );
}
