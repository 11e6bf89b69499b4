pub mod cube;
pub mod home;
pub mod not_found;
