//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Login accounts created through `POST /users/`.
    accounts (id) {
        id -> Int4,
        /// Unique login name (max 150 characters).
        username -> Varchar,
        email -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Dealerships. `registration_number` is unique and never served over HTTP.
    dealerships (id) {
        id -> Int4,
        name -> Varchar,
        registration_number -> Varchar,
    }
}

diesel::table! {
    /// Vehicles, each owned by exactly one dealership.
    vehicles (id) {
        id -> Int4,
        /// `auto` or `moto`, enforced by a CHECK constraint.
        category -> Varchar,
        make -> Varchar,
        horsepower -> Int4,
        pre_tax_price -> Float8,
        /// Owning dealership; rows cascade on dealership deletion.
        dealership_id -> Int4,
    }
}

diesel::joinable!(vehicles -> dealerships (dealership_id));

diesel::allow_tables_to_appear_in_same_query!(accounts, dealerships, vehicles);
