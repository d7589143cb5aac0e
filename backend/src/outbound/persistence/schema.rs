//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration, then restore the doc
//! comments.

diesel::table! {
    /// Directory of registered users.
    users (id) {
        /// Serial primary key; never reused.
        id -> Int4,
        name -> Text,
        /// Unique case-insensitively via the `users_email_lower_key` index.
        email -> Text,
        phone -> Text,
        /// Date of birth.
        dob -> Date,
        /// Opaque avatar URL, when one was uploaded.
        image_url -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Directed follow edges. Primary key `(follower_id, following_id)`.
    follows (follower_id, following_id) {
        /// User doing the following.
        follower_id -> Int4,
        /// User being followed.
        following_id -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, follows);
