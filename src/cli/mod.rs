//! # CLI Module
//!
//! The interactive front end: menu loop, prompt helpers, and console
//! rendering. Presentation only; all business rules live in the domain
//! layer.

pub mod menu;
pub mod prompts;
