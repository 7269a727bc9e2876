pub mod form_fields;
pub mod post;
pub mod project;
pub mod resource;
pub mod tech_stack;
pub mod token;
