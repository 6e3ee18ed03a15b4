// mbart.rs
//
// Copyright (c) 2024 Junpei Kawamoto
//
// This software is released under the MIT License.
//
// http://opensource.org/licenses/mit-license.php

//! mBART-50 many-to-many translation on CTranslate2.
//!
//! The model directory is expected to be a CTranslate2 conversion of
//! `facebook/mbart-large-50-many-to-many-mmt` with its Hugging Face `tokenizer.json`
//! copied next to `model.bin`.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, Context, Error, Result};
use ct2rs::config::{Config, Device};
use ct2rs::{Tokenizer, TranslationOptions, Translator};
use tracing::{debug, info, warn};

use crate::delegate::Translate;
use crate::error::TranslationError;
use crate::language::LanguageCode;

const EOS: &str = "</s>";
const UNK: &str = "<unk>";

/// Language tokens known to mBART-50.
pub const MBART50_LANGUAGE_CODES: [&str; 52] = [
    "ar_AR", "cs_CZ", "de_DE", "en_XX", "es_XX", "et_EE", "fi_FI", "fr_XX", "gu_IN", "hi_IN",
    "it_IT", "ja_XX", "kk_KZ", "ko_KR", "lt_LT", "lv_LV", "my_MM", "ne_NP", "nl_XX", "ro_RO",
    "ru_RU", "si_LK", "tr_TR", "vi_VN", "zh_CN", "af_ZA", "az_AZ", "bn_IN", "fa_IR", "he_IL",
    "hr_HR", "id_ID", "ka_GE", "km_KH", "mk_MK", "ml_IN", "mn_MN", "mr_IN", "pl_PL", "ps_AF",
    "pt_XX", "sv_SE", "sw_KE", "ta_IN", "te_IN", "th_TH", "tl_XX", "uk_UA", "ur_PK", "xh_ZA",
    "gl_ES", "sl_SI",
];

/// Tokenizer producing mBART-50 source sequences.
///
/// Input lines carry their language token first, separated from the text by a
/// single space: `hi_IN नमस्ते`. The encoded form is
/// `[hi_IN, ▁नमस्ते, </s>]`.
#[derive(Debug, Clone)]
pub struct Mbart50Tokenizer {
    inner: tokenizers::Tokenizer,
}

impl Mbart50Tokenizer {
    pub fn new(inner: tokenizers::Tokenizer) -> Self {
        Self { inner }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(
            tokenizers::Tokenizer::from_file(path).map_err(Error::msg)?,
        ))
    }

    /// Formats a source line for [`Tokenizer::encode`].
    pub fn source_line(lang_token: &str, text: &str) -> String {
        format!("{lang_token} {text}")
    }

    /// Converts generated tokens to ids. Tokens missing from the vocabulary become `<unk>`.
    fn token_ids(&self, tokens: &[String]) -> Vec<u32> {
        let unk = self.inner.token_to_id(UNK);
        tokens
            .iter()
            .filter_map(|t| match self.inner.token_to_id(t) {
                Some(id) => Some(id),
                None => {
                    warn!(token = %t, "generated token is not in the tokenizer vocabulary");
                    unk
                }
            })
            .collect()
    }

    /// Maps every mBART-50 language token present in the vocabulary to its id.
    pub fn lang_code_to_id(&self) -> HashMap<&'static str, u32> {
        MBART50_LANGUAGE_CODES
            .iter()
            .filter_map(|code| self.inner.token_to_id(code).map(|id| (*code, id)))
            .collect()
    }
}

impl Tokenizer for Mbart50Tokenizer {
    fn encode(&self, input: &str) -> Result<Vec<String>> {
        let (lang, text) = input.split_once(' ').unwrap_or((input, ""));
        let encoding = self.inner.encode(text, false).map_err(Error::msg)?;

        let mut tokens = Vec::with_capacity(encoding.len() + 2);
        tokens.push(lang.to_string());
        tokens.extend(encoding.get_tokens().iter().cloned());
        tokens.push(EOS.to_string());
        Ok(tokens)
    }

    fn decode(&self, tokens: Vec<String>) -> Result<String> {
        let ids = self.token_ids(&tokens);
        self.inner.decode(&ids, true).map_err(Error::msg)
    }
}

/// A loaded mBART-50 model.
pub struct Mbart50 {
    inner: Translator<Mbart50Tokenizer>,
    lang_code_to_id: HashMap<&'static str, u32>,
    options: TranslationOptions<String, String>,
}

impl Mbart50 {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let tokenizer = Mbart50Tokenizer::from_file(model_dir.join("tokenizer.json"))
            .with_context(|| format!("failed to load a tokenizer from {}", model_dir.display()))?;
        let lang_code_to_id = tokenizer.lang_code_to_id();

        let config = Config {
            device,
            ..Default::default()
        };
        let inner = Translator::with_tokenizer(model_dir, tokenizer, &config).with_context(|| {
            format!(
                "failed to initialize a translator from {}",
                model_dir.display()
            )
        })?;
        info!(
            model_dir = %model_dir.display(),
            languages = lang_code_to_id.len(),
            "loaded mBART-50 model"
        );

        Ok(Self {
            inner,
            lang_code_to_id,
            options: TranslationOptions {
                beam_size: 5,
                max_decoding_length: 200,
                ..Default::default()
            },
        })
    }
}

impl Translate for Mbart50 {
    fn translate(
        &self,
        text: &str,
        source: LanguageCode,
        target: LanguageCode,
    ) -> Result<String, TranslationError> {
        let (source_line, target_token) = prepare(&self.lang_code_to_id, text, source, target)?;
        debug!(%source_line, %target_token, "generating");

        let res = self.inner.translate_batch_with_target_prefix(
            &[source_line],
            &vec![vec![target_token]],
            &self.options,
            None,
        )?;
        res.into_iter()
            .next()
            .map(|(translated, _)| translated)
            .ok_or_else(|| anyhow!("the model returned no translation").into())
    }
}

/// Builds the source line and the forced target token for one request.
///
/// A source language without a model id falls back to `<unk>`; a target
/// language without one is an error since generation cannot be steered.
fn prepare(
    lang_code_to_id: &HashMap<&'static str, u32>,
    text: &str,
    source: LanguageCode,
    target: LanguageCode,
) -> Result<(String, String), TranslationError> {
    let target_token = match lang_code_to_id.get(target.code()) {
        Some(_) => target.code().to_string(),
        None => return Err(TranslationError::unknown_language_id(target.code())),
    };
    let source_token = if lang_code_to_id.contains_key(source.code()) {
        source.code()
    } else {
        UNK
    };
    Ok((Mbart50Tokenizer::source_line(source_token, text), target_token))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    const TOKENIZER: &str = r#"{
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [
            {"id": 0, "content": "<unk>", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
            {"id": 1, "content": "</s>", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
            {"id": 2, "content": "en_XX", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
            {"id": 3, "content": "hi_IN", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
        ],
        "normalizer": null,
        "pre_tokenizer": {"type": "WhitespaceSplit"},
        "post_processor": null,
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": {"<unk>": 0, "</s>": 1, "en_XX": 2, "hi_IN": 3, "hello": 4, "world": 5},
            "unk_token": "<unk>"
        }
    }"#;

    fn tokenizer() -> Mbart50Tokenizer {
        Mbart50Tokenizer::new(tokenizers::Tokenizer::from_str(TOKENIZER).unwrap())
    }

    #[test]
    fn encode_wraps_text_with_language_and_eos() {
        let tokens = tokenizer().encode("en_XX hello world").unwrap();
        assert_eq!(tokens, vec!["en_XX", "hello", "world", "</s>"]);
    }

    #[test]
    fn encode_empty_text() {
        let tokens = tokenizer().encode("en_XX ").unwrap();
        assert_eq!(tokens, vec!["en_XX", "</s>"]);
    }

    #[test]
    fn decode_skips_special_tokens() {
        let text = tokenizer()
            .decode(
                ["hi_IN", "hello", "world", "</s>"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            )
            .unwrap();
        assert_eq!(text, "hello world");
    }

    #[test]
    fn tokens_outside_vocabulary_become_unk() {
        let tokens = ["hi_IN", "hello", "bonjour", "world"]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        assert_eq!(tokenizer().token_ids(&tokens), vec![3, 4, 0, 5]);
        assert_eq!(tokenizer().decode(tokens).unwrap(), "hello world");
    }

    #[test]
    fn lang_code_to_id_only_lists_known_tokens() {
        let ids = tokenizer().lang_code_to_id();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids.get("en_XX"), Some(&2));
        assert_eq!(ids.get("hi_IN"), Some(&3));
        assert!(!ids.contains_key("ta_IN"));
    }

    #[test]
    fn assamese_is_not_an_mbart50_language() {
        assert!(!MBART50_LANGUAGE_CODES.contains(&LanguageCode::Assamese.code()));
        for lang in LanguageCode::ALL
            .into_iter()
            .filter(|l| *l != LanguageCode::Assamese)
        {
            assert!(MBART50_LANGUAGE_CODES.contains(&lang.code()), "{lang}");
        }
    }

    #[test]
    fn prepare_forces_target_token() {
        let ids = tokenizer().lang_code_to_id();
        let (line, target) =
            prepare(&ids, "hello", LanguageCode::English, LanguageCode::Hindi).unwrap();
        assert_eq!(line, "en_XX hello");
        assert_eq!(target, "hi_IN");
    }

    #[test]
    fn prepare_rejects_target_without_id() {
        let ids = tokenizer().lang_code_to_id();
        let err = prepare(&ids, "hello", LanguageCode::English, LanguageCode::Tamil).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error: 'ta_IN'. Ensure the target language code is valid."
        );
    }

    #[test]
    fn prepare_falls_back_to_unk_source() {
        let ids = tokenizer().lang_code_to_id();
        let (line, _) =
            prepare(&ids, "hello", LanguageCode::Assamese, LanguageCode::English).unwrap();
        assert_eq!(line, "<unk> hello");
    }
}
