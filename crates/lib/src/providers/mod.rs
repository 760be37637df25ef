//! # Upstream Providers
//!
//! Clients for the two third-party HTTP APIs the relay talks to: the
//! chat-completion endpoint and the WhatsApp Cloud messaging API.

pub mod ai;
pub mod whatsapp;
