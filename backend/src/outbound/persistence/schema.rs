//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. The
//! `diesel print-schema` command can regenerate them from a migrated database.

diesel::table! {
    /// Registered accounts. `email` is unique and stored lower-cased.
    users (id) {
        id -> Uuid,
        full_name -> Text,
        email -> Text,
        /// Argon2id PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Open sessions keyed by the SHA-256 digest of the cookie token.
    sessions (token_hash) {
        token_hash -> Varchar,
        user_id -> Uuid,
        full_name -> Text,
        email -> Text,
        established_at -> Timestamptz,
    }
}

diesel::table! {
    reservations (id) {
        id -> Uuid,
        user_id -> Nullable<Uuid>,
        name -> Text,
        email -> Text,
        phone -> Text,
        reservation_date -> Date,
        reservation_time -> Time,
        guests -> Int4,
        status -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    contacts (id) {
        id -> Uuid,
        name -> Text,
        email -> Text,
        message -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    feedback (id) {
        id -> Uuid,
        name -> Text,
        email -> Text,
        rating -> Int2,
        message -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(sessions -> users (user_id));
diesel::joinable!(reservations -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, sessions, reservations, contacts, feedback);
