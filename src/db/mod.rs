pub mod access_keys;
pub mod endpoints;
pub mod projects;
