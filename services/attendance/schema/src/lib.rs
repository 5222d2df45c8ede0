//! sea-orm entities for the attendance service.

pub mod access_events;
pub mod employees;
pub mod face_encodings;
