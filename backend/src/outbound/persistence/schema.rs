//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Registered users. Hosts own offices; visitors hold reservations.
    users (id) {
        id -> Int8,
        name -> Varchar,
        email -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Office labels.
    tags (id) {
        id -> Int8,
        name -> Varchar,
    }
}

diesel::table! {
    /// Office listings.
    ///
    /// Coordinates are exact decimal degrees with eight fractional digits.
    /// Rows with a non-null `deleted_at` are soft-deleted and invisible to
    /// every read.
    offices (id) {
        id -> Int8,
        /// Owning host.
        user_id -> Int8,
        title -> Varchar,
        description -> Text,
        latitude -> Numeric,
        longitude -> Numeric,
        address_line1 -> Varchar,
        /// 1 = pending, 2 = approved.
        approval_status -> Int2,
        hidden -> Bool,
        price_per_day -> Int4,
        monthly_discount -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Many-to-many link between offices and tags.
    offices_tags (office_id, tag_id) {
        office_id -> Int8,
        tag_id -> Int8,
    }
}

diesel::table! {
    /// Images owned by any kind of record.
    ///
    /// `resource_type` names the owner kind and `resource_id` its key.
    images (id) {
        id -> Int8,
        resource_type -> Varchar,
        resource_id -> Int8,
        path -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Bookings of an office by a visitor.
    reservations (id) {
        id -> Int8,
        user_id -> Int8,
        office_id -> Int8,
        price -> Int4,
        /// 1 = active, 2 = canceled.
        status -> Int2,
        start_date -> Date,
        end_date -> Date,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Hashed personal access tokens and the abilities they grant.
    personal_access_tokens (id) {
        id -> Int8,
        user_id -> Int8,
        name -> Varchar,
        /// Hex SHA-256 of the plaintext token.
        token_hash -> Varchar,
        abilities -> Array<Text>,
        last_used_at -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(offices -> users (user_id));
diesel::joinable!(offices_tags -> offices (office_id));
diesel::joinable!(offices_tags -> tags (tag_id));
diesel::joinable!(reservations -> offices (office_id));
diesel::joinable!(reservations -> users (user_id));
diesel::joinable!(personal_access_tokens -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    tags,
    offices,
    offices_tags,
    images,
    reservations,
    personal_access_tokens,
);
