// client.rs
//
// Copyright (c) 2024 Junpei Kawamoto
//
// This software is released under the MIT License.
//
// http://opensource.org/licenses/mit-license.php

use anyhow::{anyhow, Result};
use reqwest::blocking::Client;

use crate::delegate::Translate;
use crate::error::TranslationError;
use crate::handler::{TranslationRequest, TranslationResponse};
use crate::language::LanguageCode;

/// Translates through a running `bhashad` instead of a local model.
///
/// Uses a blocking client, so it must not be called from within an async runtime.
pub struct RemoteTranslator {
    inner: Client,
    endpoint: String,
}

impl RemoteTranslator {
    pub fn new<T: AsRef<str>>(base_url: T) -> Result<Self> {
        Ok(Self {
            inner: Client::builder().build()?,
            endpoint: format!("{}/translate", base_url.as_ref().trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Translate for RemoteTranslator {
    fn translate(
        &self,
        text: &str,
        source: LanguageCode,
        target: LanguageCode,
    ) -> Result<String, TranslationError> {
        let res = self
            .inner
            .post(&self.endpoint)
            .json(&TranslationRequest::new(text, source.code(), target.code()))
            .send()
            .map_err(anyhow::Error::from)?;

        let status = res.status();
        match res.json::<TranslationResponse>() {
            Ok(body) => interpret(body),
            Err(e) => Err(anyhow!(
                "unexpected response from {} ({status}): {e}",
                self.endpoint
            )
            .into()),
        }
    }
}

/// Maps a response body back onto the error kinds the server produced it from.
fn interpret(body: TranslationResponse) -> Result<String, TranslationError> {
    match body {
        TranslationResponse::Translated { translated_text } => Ok(translated_text),
        TranslationResponse::Failed { error }
            if error == TranslationError::InvalidLanguage.to_string() =>
        {
            Err(TranslationError::InvalidLanguage)
        }
        TranslationResponse::Failed { error } => Err(TranslationError::Rejected(error)),
    }
}
