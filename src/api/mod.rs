//! Typed wrappers over the platform REST surface
//!
//! Each module groups one area of the API. The functions format the request,
//! hand it to the session manager's dispatch (which owns credential
//! attachment and the refresh-retry policy), and type the response. No
//! business logic lives here.

pub mod lessons;
pub mod profile;
pub mod programs;
