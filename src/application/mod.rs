// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Boundary between front ends and the repositories
// - Front ends receive records, lists and result codes; they never touch the Store

pub mod error_handling;

pub use error_handling::{ErrorResponse, ErrorType, ReturnCode, ToErrorResponse};
