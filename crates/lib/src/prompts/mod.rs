//! # Prompt Template Modules
//!
//! This module organizes the prompt templates used by the `admitbot` library.

pub mod admissions;
