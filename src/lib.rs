//! A-Prime chat client.
//!
//! The library holds everything that does not need a renderer: the wire
//! client for the chat backend, the session/message synchronization core,
//! response classification and the preference store. The Dioxus front end
//! lives in [`ui`] and [`views`].

pub mod api;
pub mod classify;
pub mod config;
pub mod storage;
pub mod sync;
pub mod types;

#[cfg(feature = "dioxus")]
pub mod theme;
#[cfg(feature = "dioxus")]
pub mod ui;
#[cfg(feature = "dioxus")]
pub mod views;
