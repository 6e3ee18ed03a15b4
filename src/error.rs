// error.rs
//
// Copyright (c) 2024 Junpei Kawamoto
//
// This software is released under the MIT License.
//
// http://opensource.org/licenses/mit-license.php

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslationError {
    /// Either language token is not in the supported table.
    #[error("Invalid language choice")]
    InvalidLanguage,

    /// The model has no id for the requested language token. Holds the quoted token.
    #[error("Error: {0}. Ensure the target language code is valid.")]
    UnknownLanguageId(String),

    /// An error message reported by a remote translation service.
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl TranslationError {
    /// Builds a [`TranslationError::UnknownLanguageId`] for the given token.
    pub fn unknown_language_id<T: AsRef<str>>(code: T) -> Self {
        TranslationError::UnknownLanguageId(format!("'{}'", code.as_ref()))
    }

    /// Returns true if the request itself was at fault rather than the translator.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, TranslationError::Backend(_))
    }
}
