// lib.rs
//
// Copyright (c) 2024 Junpei Kawamoto
//
// This software is released under the MIT License.
//
// http://opensource.org/licenses/mit-license.php

use tracing_subscriber::EnvFilter;

pub use client::RemoteTranslator;
pub use console::Console;
pub use delegate::Translate;
pub use error::TranslationError;
pub use handler::{TranslationRequest, TranslationResponse};
pub use language::LanguageCode;
pub use mbart::Mbart50;
pub use server::Server;

pub mod client;
pub mod console;
pub mod delegate;
pub mod error;
pub mod handler;
pub mod language;
pub mod mbart;
pub mod model;
pub mod server;

/// Installs a stderr logger honoring `RUST_LOG`, falling back to `default_filter`.
pub fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
