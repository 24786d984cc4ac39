//! Diesel table definitions for the storefront schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Items offered for sale.
    ///
    /// `status` holds `active`, `sold` or `hidden`; `condition` holds the
    /// snake_case condition code.
    listings (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning seller.
        seller_id -> Uuid,
        /// Title, at most 60 characters.
        title -> Varchar,
        description -> Text,
        /// Price in yen, always positive.
        price -> Int8,
        condition -> Varchar,
        category -> Varchar,
        brand -> Nullable<Varchar>,
        model -> Nullable<Varchar>,
        /// Normalised search tags.
        tags -> Array<Text>,
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ordered images of a listing; position 0 is the primary image.
    listing_images (listing_id, position) {
        listing_id -> Uuid,
        position -> Int4,
        url -> Text,
        is_primary -> Bool,
    }
}

diesel::table! {
    /// Listings a user has saved.
    favorites (user_id, listing_id) {
        user_id -> Uuid,
        /// Cascades on listing deletion.
        listing_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(listing_images -> listings (listing_id));
diesel::joinable!(favorites -> listings (listing_id));

diesel::allow_tables_to_appear_in_same_query!(favorites, listing_images, listings);
