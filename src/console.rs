// console.rs
//
// Copyright (c) 2024 Junpei Kawamoto
//
// This software is released under the MIT License.
//
// http://opensource.org/licenses/mit-license.php

use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::delegate::Translate;
use crate::handler::{self, TranslationRequest};
use crate::language::LanguageCode;

const EXIT: &str = "exit";

/// Interactive prompt/translate loop over arbitrary line input and output.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Runs until `exit` is entered at the text prompt or the input ends.
    pub fn run<T: Translate + ?Sized>(&mut self, translator: &T) -> io::Result<()> {
        let choices = LanguageCode::ALL
            .iter()
            .map(|l| l.name())
            .collect::<Vec<_>>()
            .join("/");

        writeln!(self.output, "Languages available for translation using mBART:")?;
        for lang in LanguageCode::ALL {
            writeln!(self.output, "{}: {}", lang.name(), lang.code())?;
        }

        loop {
            writeln!(self.output, "\nEnter source and target languages:")?;
            let Some(source) = self.prompt(&format!("Source language ({choices}): "))? else {
                break;
            };
            let Some(target) = self.prompt(&format!("Target language ({choices}): "))? else {
                break;
            };

            let (Some(source), Some(target)) =
                (LanguageCode::from_name(&source), LanguageCode::from_name(&target))
            else {
                writeln!(
                    self.output,
                    "Invalid language choice. Please select from the available options."
                )?;
                continue;
            };

            let Some(text) = self.prompt("Enter text to translate (type 'exit' to quit): ")? else {
                break;
            };
            let text = text.trim();
            if text.eq_ignore_ascii_case(EXIT) {
                break;
            }

            let req = TranslationRequest::new(text, source.code(), target.code());
            match handler::translate(translator, &req) {
                Ok(translated) => writeln!(
                    self.output,
                    "\nTranslated Text ({} to {}): {}",
                    source.name(),
                    target.name(),
                    translated
                )?,
                Err(e) => {
                    warn!("translation failed: {e:#}");
                    writeln!(self.output, "{e}")?
                }
            }
        }

        writeln!(self.output, "Exiting the translator. Goodbye!")?;
        self.output.flush()
    }

    /// Prints a prompt and reads one line without its terminator. Returns `None` at end of input.
    fn prompt(&mut self, msg: &str) -> io::Result<Option<String>> {
        write!(self.output, "{msg}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::handler::tests::Recorder;

    fn run(input: &str, translator: &Recorder) -> String {
        let mut out = Vec::new();
        Console::new(Cursor::new(input.as_bytes()), &mut out)
            .run(translator)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn lists_languages_first() {
        let out = run("", &Recorder::default());
        assert!(out.starts_with(
            "Languages available for translation using mBART:\nEnglish: en_XX\n"
        ));
        assert!(out.contains("Assamese: as_IN\n"));
    }

    #[test]
    fn translates_until_exit() {
        let rec = Recorder::default();
        let out = run("english\nHINDI\n  Hello  \nTamil\nbengali\nEXIT\n", &rec);

        assert!(out.contains("\nTranslated Text (English to Hindi): hi_IN:Hello\n"));
        assert!(out.ends_with("Exiting the translator. Goodbye!\n"));
        assert_eq!(
            rec.calls.lock().unwrap().as_slice(),
            &[("Hello".to_string(), LanguageCode::English, LanguageCode::Hindi)]
        );
    }

    #[test]
    fn exit_does_not_translate() {
        let rec = Recorder::default();
        let out = run("english\nhindi\nexit\n", &rec);

        assert_eq!(rec.count(), 0);
        assert!(!out.contains("Translated Text"));
        assert!(out.ends_with("Exiting the translator. Goodbye!\n"));
    }

    #[test]
    fn invalid_language_reprompts() {
        let rec = Recorder::default();
        let out = run("klingon\nhindi\nenglish\nvulcan\nenglish\nhindi\nHello\nexit\n", &rec);

        assert_eq!(
            out.matches("Invalid language choice. Please select from the available options.")
                .count(),
            2
        );
        assert_eq!(out.matches("Enter source and target languages:").count(), 4);
        assert_eq!(rec.count(), 1);
    }

    #[test]
    fn errors_are_printed_and_loop_continues() {
        let rec = Recorder::default();
        let out = run("english\nassamese\nHello\nenglish\ntamil\nHello\n", &rec);

        assert!(out.contains("Error: 'as_IN'. Ensure the target language code is valid.\n"));
        assert!(out.contains("Translated Text (English to Tamil): ta_IN:Hello"));
        assert_eq!(rec.count(), 2);
    }

    #[test]
    fn backend_failures_are_printed_and_loop_continues() {
        let rec = Recorder::default();
        let out = run("english\nhindi\nboom\nbengali\nmarathi\nHello\nexit\n", &rec);

        assert!(out.contains("device lost\n"));
        assert!(out.contains("Translated Text (Bengali to Marathi): mr_IN:Hello"));
        assert!(out.ends_with("Exiting the translator. Goodbye!\n"));
        assert_eq!(rec.count(), 2);
    }

    #[test]
    fn end_of_input_ends_session() {
        let rec = Recorder::default();
        let out = run("english\n", &rec);

        assert_eq!(rec.count(), 0);
        assert!(out.ends_with("Exiting the translator. Goodbye!\n"));
    }
}
