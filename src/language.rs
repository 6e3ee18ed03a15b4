// language.rs
//
// Copyright (c) 2024 Junpei Kawamoto
//
// This software is released under the MIT License.
//
// http://opensource.org/licenses/mit-license.php

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::TranslationError;

/// Languages accepted by both the console and the HTTP service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageCode {
    English,
    Hindi,
    Tamil,
    Bengali,
    Gujarati,
    Marathi,
    Assamese,
}

impl LanguageCode {
    /// Every supported language, in the order they are listed to users.
    pub const ALL: [LanguageCode; 7] = [
        LanguageCode::English,
        LanguageCode::Hindi,
        LanguageCode::Tamil,
        LanguageCode::Bengali,
        LanguageCode::Gujarati,
        LanguageCode::Marathi,
        LanguageCode::Assamese,
    ];

    /// Returns the mBART-50 style token, e.g. `hi_IN`.
    pub fn code(&self) -> &'static str {
        match self {
            LanguageCode::English => "en_XX",
            LanguageCode::Hindi => "hi_IN",
            LanguageCode::Tamil => "ta_IN",
            LanguageCode::Bengali => "bn_IN",
            LanguageCode::Gujarati => "gu_IN",
            LanguageCode::Marathi => "mr_IN",
            LanguageCode::Assamese => "as_IN",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LanguageCode::English => "English",
            LanguageCode::Hindi => "Hindi",
            LanguageCode::Tamil => "Tamil",
            LanguageCode::Bengali => "Bengali",
            LanguageCode::Gujarati => "Gujarati",
            LanguageCode::Marathi => "Marathi",
            LanguageCode::Assamese => "Assamese",
        }
    }

    /// Looks up a language by its exact token. No trimming or case folding is applied.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.code() == code)
    }

    /// Looks up a language by its English name, ignoring case and surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|l| l.name().eq_ignore_ascii_case(name))
    }
}

impl Display for LanguageCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for LanguageCode {
    type Err = TranslationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or(TranslationError::InvalidLanguage)
    }
}

impl Serialize for LanguageCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_exactly() {
        assert_eq!(LanguageCode::from_code("en_XX"), Some(LanguageCode::English));
        assert_eq!(LanguageCode::from_code("as_IN"), Some(LanguageCode::Assamese));
        assert_eq!(LanguageCode::from_code("EN_XX"), None);
        assert_eq!(LanguageCode::from_code(" hi_IN"), None);
        assert_eq!(LanguageCode::from_code("xx_XX"), None);
        assert_eq!(LanguageCode::from_code(""), None);
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(LanguageCode::from_name("hindi"), Some(LanguageCode::Hindi));
        assert_eq!(LanguageCode::from_name("  TAMIL \n"), Some(LanguageCode::Tamil));
        assert_eq!(LanguageCode::from_name("Gujarati"), Some(LanguageCode::Gujarati));
        assert_eq!(LanguageCode::from_name("hi_IN"), None);
        assert_eq!(LanguageCode::from_name("klingon"), None);
    }

    #[test]
    fn every_entry_round_trips() {
        for lang in LanguageCode::ALL {
            assert_eq!(LanguageCode::from_code(lang.code()), Some(lang));
            assert_eq!(LanguageCode::from_name(lang.name()), Some(lang));
            assert_eq!(lang.to_string(), lang.code());
        }
    }

    #[test]
    fn parse_rejects_unknown_tokens() {
        assert!(matches!(
            "fr_XX".parse::<LanguageCode>(),
            Err(TranslationError::InvalidLanguage)
        ));
        assert_eq!("mr_IN".parse::<LanguageCode>().ok(), Some(LanguageCode::Marathi));
    }

    #[test]
    fn serializes_as_code() {
        assert_eq!(
            serde_json::to_string(&LanguageCode::Bengali).unwrap(),
            "\"bn_IN\""
        );
    }
}
