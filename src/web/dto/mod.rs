pub mod account;
pub mod courses;
pub mod exam;
