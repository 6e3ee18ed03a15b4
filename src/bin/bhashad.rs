// bhashad.rs
//
// Copyright (c) 2024 Junpei Kawamoto
//
// This software is released under the MIT License.
//
// http://opensource.org/licenses/mit-license.php

use std::net::SocketAddr;

use anyhow::Result;
use clap::{crate_name, Parser};
use tokio::signal;
use tokio::sync::oneshot;
use tracing::{info, warn};

use bhasha::model::ModelArgs;
use bhasha::{init_logging, Mbart50, Server};

const APP_NAME: &str = crate_name!();

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    model: ModelArgs,
    /// Specifies the address to listen on.
    #[arg(long, value_name = "ADDR", default_value = "127.0.0.1:5000")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging("bhasha=info,tower_http=info");

    let model_dir = args.model.resolve(APP_NAME)?;
    info!("Loading the mBART model and tokenizer...");
    let device = args.model.device.device();
    let model = tokio::task::spawn_blocking(move || Mbart50::load(model_dir, device)).await??;
    info!("Model loaded successfully.");

    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            tx.send(()).ok();
        }
    });

    let server = Server::new(model);
    server
        .serve(args.bind, async move {
            if let Err(e) = rx.await {
                warn!("failed to receive a signal: {e}");
            }
        })
        .await?;

    Ok(())
}
