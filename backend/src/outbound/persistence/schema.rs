//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        /// Lower-cased sign-in email; unique.
        email -> Varchar,
        display_name -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        /// Null until the user confirms their email address.
        confirmed_at -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    questions (id) {
        id -> Uuid,
        author_id -> Uuid,
        title -> Varchar,
        body -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    answers (id) {
        id -> Uuid,
        question_id -> Uuid,
        author_id -> Uuid,
        body -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only vote log; the tally of an answer is `SUM(value)`.
    answer_votes (id) {
        id -> Int8,
        answer_id -> Uuid,
        voter_id -> Uuid,
        /// `1` for an upvote, `-1` for a downvote.
        value -> Int2,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(questions -> users (author_id));
diesel::joinable!(answers -> questions (question_id));
diesel::joinable!(answer_votes -> answers (answer_id));

diesel::allow_tables_to_appear_in_same_query!(users, questions, answers, answer_votes);
