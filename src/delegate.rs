// delegate.rs
//
// Copyright (c) 2024 Junpei Kawamoto
//
// This software is released under the MIT License.
//
// http://opensource.org/licenses/mit-license.php

use std::sync::Arc;

use crate::error::TranslationError;
use crate::language::LanguageCode;

/// Something that turns text in one language into text in another.
///
/// Implementations are loaded once and shared read-only by every request, so
/// `translate` takes `&self` and must be callable from several threads at once.
pub trait Translate: Send + Sync {
    fn translate(
        &self,
        text: &str,
        source: LanguageCode,
        target: LanguageCode,
    ) -> Result<String, TranslationError>;
}

impl<T: Translate + ?Sized> Translate for &T {
    fn translate(
        &self,
        text: &str,
        source: LanguageCode,
        target: LanguageCode,
    ) -> Result<String, TranslationError> {
        (**self).translate(text, source, target)
    }
}

impl<T: Translate + ?Sized> Translate for Box<T> {
    fn translate(
        &self,
        text: &str,
        source: LanguageCode,
        target: LanguageCode,
    ) -> Result<String, TranslationError> {
        (**self).translate(text, source, target)
    }
}

impl<T: Translate + ?Sized> Translate for Arc<T> {
    fn translate(
        &self,
        text: &str,
        source: LanguageCode,
        target: LanguageCode,
    ) -> Result<String, TranslationError> {
        (**self).translate(text, source, target)
    }
}
