//! Core service logic: the upload-and-verify backup pipeline.

pub mod backup_service;
