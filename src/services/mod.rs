// Services module for business logic
pub mod archive;
pub mod importer;
pub mod signature;
pub mod validator;
pub mod walker;
