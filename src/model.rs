// model.rs
//
// Copyright (c) 2024 Junpei Kawamoto
//
// This software is released under the MIT License.
//
// http://opensource.org/licenses/mit-license.php

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, ValueEnum};
use ct2rs::config::Device;
use directories::ProjectDirs;
use hf_hub::api::sync::Api;
use tracing::info;

/// Files making up a converted model, fetched from the Hugging Face Hub when missing.
const MODEL_FILES: [&str; 3] = ["config.json", "model.bin", "tokenizer.json"];
const VOCABULARY_FILES: [&str; 2] = ["shared_vocabulary.json", "shared_vocabulary.txt"];

/// Options selecting and locating the translation model.
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Specifies the name of the model to be used.
    #[arg(
        short,
        long,
        value_name = "NAME",
        default_value = "mbart-large-50-many-to-many-mmt"
    )]
    pub model: String,
    /// Loads the model from the specified directory.
    #[arg(long, value_name = "DIR")]
    pub model_dir: Option<PathBuf>,
    /// Downloads the model from this Hugging Face repository if it is not present locally.
    #[arg(long, value_name = "REPO")]
    pub hf_repo: Option<String>,
    /// Specifies the device to run the model on.
    #[arg(long, value_enum, default_value_t = DeviceChoice::Auto)]
    pub device: DeviceChoice,
}

impl ModelArgs {
    /// Returns a directory containing the model, downloading it if requested.
    pub fn resolve<T: AsRef<str>>(&self, app_name: T) -> Result<PathBuf> {
        let model_dir = match &self.model_dir {
            Some(model_dir) => model_dir.clone(),
            None => ProjectDirs::from("", "", app_name.as_ref())
                .ok_or_else(|| anyhow!("failed to find home directory"))?
                .cache_dir()
                .join(&self.model),
        };
        locate(model_dir, self.hf_repo.as_deref())
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceChoice {
    /// Use CUDA if this build supports it, the CPU otherwise.
    Auto,
    Cpu,
    Cuda,
}

impl DeviceChoice {
    pub fn device(self) -> Device {
        match self {
            DeviceChoice::Auto if cfg!(any(feature = "cuda", feature = "cudnn")) => Device::CUDA,
            DeviceChoice::Auto | DeviceChoice::Cpu => Device::CPU,
            DeviceChoice::Cuda => Device::CUDA,
        }
    }
}

fn has_model<P: AsRef<Path>>(dir: P) -> bool {
    dir.as_ref().join("model.bin").is_file()
}

fn locate(model_dir: PathBuf, hf_repo: Option<&str>) -> Result<PathBuf> {
    if has_model(&model_dir) {
        return Ok(model_dir);
    }
    match hf_repo {
        Some(repo) => download(repo),
        None => bail!("no model found in {}", model_dir.display()),
    }
}

/// Fetches a converted model and returns its snapshot directory.
fn download(repo: &str) -> Result<PathBuf> {
    info!(repo, "downloading model from the Hugging Face Hub");
    let repo_api = Api::new()?.model(repo.to_string());

    let mut snapshot = None;
    for file in MODEL_FILES {
        let path = repo_api
            .get(file)
            .with_context(|| format!("failed to download {file} from {repo}"))?;
        snapshot = path.parent().map(Path::to_path_buf);
    }
    if !VOCABULARY_FILES.iter().any(|f| repo_api.get(f).is_ok()) {
        bail!("{repo} has no shared vocabulary file");
    }

    snapshot.ok_or_else(|| anyhow!("failed to locate the downloaded model"))
}
