mod access_key;
mod endpoint;
mod project;

pub use access_key::AccessKey;
pub use endpoint::Endpoint;
pub use project::Project;
