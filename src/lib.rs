//! Photoshoot generator backend
//!
//! Accepts structured photoshoot requests over HTTP, turns them into an image
//! prompt and fans the prompt out to the OpenAI Images API, returning the
//! generated image URLs.

pub mod ai;
pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod prompts;
pub mod server;

pub use error::{Error, Result};
pub use server::{create_router, AppState};
