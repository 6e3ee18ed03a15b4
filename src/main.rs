// main.rs
//
// Copyright (c) 2024 Junpei Kawamoto
//
// This software is released under the MIT License.
//
// http://opensource.org/licenses/mit-license.php

use std::io::{stdin, stdout};

use anyhow::Result;
use clap::{crate_name, Parser};
use spinners::{Spinner, Spinners};

use bhasha::model::ModelArgs;
use bhasha::{init_logging, Console, Mbart50, RemoteTranslator, Translate};

const APP_NAME: &str = crate_name!();

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    model: ModelArgs,
    /// Translates through a running bhashad at this URL instead of loading the model.
    #[arg(long, value_name = "URL")]
    server: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging("warn");

    let translator: Box<dyn Translate> = match args.server {
        Some(url) => Box::new(RemoteTranslator::new(url)?),
        None => {
            let model_dir = args.model.resolve(APP_NAME)?;
            let mut sp = Spinner::new(
                Spinners::Dots,
                "Loading the mBART model and tokenizer...".to_string(),
            );
            let model = Mbart50::load(model_dir, args.model.device.device());
            sp.stop_with_newline();
            let model = model?;
            println!("Model loaded successfully.\n");
            Box::new(model)
        }
    };

    Console::new(stdin().lock(), stdout().lock()).run(&translator)?;
    Ok(())
}
