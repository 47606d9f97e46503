pub mod profile;
pub mod result;
