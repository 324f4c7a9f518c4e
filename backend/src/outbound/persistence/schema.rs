//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Course aggregates stored as whole JSON documents.
    ///
    /// `revision` is the optimistic concurrency token; the document never
    /// carries an authoritative copy of it.
    courses (id) {
        id -> Uuid,
        revision -> Int4,
        document -> Jsonb,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only notification log. A null recipient targets the platform
    /// feed.
    notifications (id) {
        id -> Uuid,
        recipient_user_id -> Nullable<Uuid>,
        title -> Varchar,
        message -> Text,
        status -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Registered users with contact details and role.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        role -> Varchar,
    }
}

diesel::table! {
    /// Course entitlements granted by purchase.
    user_courses (user_id, course_id) {
        user_id -> Uuid,
        course_id -> Uuid,
    }
}

diesel::joinable!(user_courses -> users (user_id));
diesel::joinable!(user_courses -> courses (course_id));

diesel::allow_tables_to_appear_in_same_query!(courses, notifications, user_courses, users);
