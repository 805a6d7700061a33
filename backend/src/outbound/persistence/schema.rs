//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when a migration changes a table.

diesel::table! {
    /// Directory accounts.
    users (id) {
        id -> Int8,
        name -> Varchar,
        /// Unique, compared case-sensitively.
        email -> Text,
        password_hash -> Text,
        city -> Varchar,
        total -> Float8,
        /// `user` or `admin`.
        role -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per accepted submission.
    footprints (id) {
        id -> Int8,
        user_id -> Int8,
        name -> Varchar,
        recorded_on -> Date,
        city -> Varchar,
        transportation -> Float8,
        electricity -> Float8,
        waste -> Float8,
        total -> Float8,
    }
}

diesel::table! {
    /// Cumulative total per user; `recorded_on` is the latest submission day.
    leaderboard (user_id) {
        user_id -> Int8,
        name -> Varchar,
        recorded_on -> Date,
        city -> Varchar,
        total -> Float8,
    }
}
