//! Caller context handed to the attendance core by the authenticating gateway.
//!
//! Authentication, token validation and facility scoping happen upstream; the
//! core only reads the resulting identity headers and never makes an
//! authorization decision itself.

pub mod caller;

pub use caller::CallerContext;
