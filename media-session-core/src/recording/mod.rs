pub mod clip;
pub mod mime;
pub mod session;
