// handler.rs
//
// Copyright (c) 2024 Junpei Kawamoto
//
// This software is released under the MIT License.
//
// http://opensource.org/licenses/mit-license.php

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::delegate::Translate;
use crate::error::TranslationError;
use crate::language::LanguageCode;

/// Body of a translation request. Language fields hold raw tokens and are validated by [`translate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub src_lang: String,
    pub tgt_lang: String,
}

impl TranslationRequest {
    pub fn new<T, S, U>(text: T, src_lang: S, tgt_lang: U) -> Self
    where
        T: Into<String>,
        S: Into<String>,
        U: Into<String>,
    {
        Self {
            text: text.into(),
            src_lang: src_lang.into(),
            tgt_lang: tgt_lang.into(),
        }
    }
}

/// Exactly one of a translation or an error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranslationResponse {
    Translated { translated_text: String },
    Failed { error: String },
}

impl From<Result<String, TranslationError>> for TranslationResponse {
    fn from(res: Result<String, TranslationError>) -> Self {
        match res {
            Ok(translated_text) => TranslationResponse::Translated { translated_text },
            Err(e) => TranslationResponse::Failed {
                error: e.to_string(),
            },
        }
    }
}

/// Validates both language tokens and forwards the request to the delegate.
///
/// The delegate is never called when either token is outside the supported table.
pub fn translate<T: Translate + ?Sized>(
    delegate: &T,
    req: &TranslationRequest,
) -> Result<String, TranslationError> {
    let (Some(source), Some(target)) = (
        LanguageCode::from_code(&req.src_lang),
        LanguageCode::from_code(&req.tgt_lang),
    ) else {
        warn!(
            src_lang = %req.src_lang,
            tgt_lang = %req.tgt_lang,
            "rejected unsupported language"
        );
        return Err(TranslationError::InvalidLanguage);
    };

    debug!("Source Language Code: {source}, Target Language Code: {target}");
    delegate.translate(&req.text, source, target)
}
