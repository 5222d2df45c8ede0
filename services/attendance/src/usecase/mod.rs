pub mod access_event;
pub mod employee;
pub mod enrollment;
pub mod recognition;
