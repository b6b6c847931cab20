pub mod disease;
pub mod exam;
pub mod hospitalization;
pub mod surgery;
pub mod user_surgery;

pub use disease::Disease;
pub use exam::{Exam, NewExam};
pub use hospitalization::{Hospitalization, NewHospitalization};
pub use surgery::{normalize_surgery_name, Surgery};
pub use user_surgery::{NewUserSurgery, UserSurgery, UserSurgeryDetails, UserSurgeryWithName};
