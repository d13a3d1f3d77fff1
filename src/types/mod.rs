//! Type definitions for the platform client
//!
//! This module contains the main data structures used for requests and responses.

pub mod request;
pub mod response;

pub use request::{
    LoginRequest, LogoutRequest, MathAnswerRequest, ProfileUpdate, RegisterRequest,
    TokenRefreshRequest,
};
pub use response::{
    ActivityEntry, ApiErrorBody, AuthCheckResponse, AuthResponse, CompletionResponse,
    CurrentProgram, Dashboard, DashboardStats, EnrollmentResult, Lesson, MathCheckResult, Module,
    Profile, ProfileStats, Program, ProgramProgress, TokenRefreshResponse, UserRecord,
};
