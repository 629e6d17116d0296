pub mod bulk;
pub mod time;
pub mod validation;
