pub mod slugify;
pub mod valid_uuid;
