// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod credentialing_service;

pub use credentialing_service::CredentialingService;
