// Protected handlers: every route here sits behind the bearer token middleware
// and reads the caller from the `AuthUser` extension.

pub mod catalog;
pub mod exams;
pub mod user_surgeries;

pub use catalog::{disease_list, surgery_list};
