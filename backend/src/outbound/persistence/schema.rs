//! Diesel table definitions matching `migrations/`.

diesel::table! {
    users (id) {
        #[max_length = 24]
        id -> Varchar,
        name -> Text,
        email -> Text,
        username -> Text,
        password_digest -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    blogs (id) {
        #[max_length = 24]
        id -> Varchar,
        title -> Text,
        content -> Text,
        #[max_length = 24]
        author_id -> Varchar,
        author -> Jsonb,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(blogs -> users (author_id));

diesel::allow_tables_to_appear_in_same_query!(blogs, users);
