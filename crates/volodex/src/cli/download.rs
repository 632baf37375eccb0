//! `volodex download`: fetch the MTGJSON bulk dataset.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::AsyncWriteExt;
use tracing::info;

use super::config::VolodexConfig;
use super::output::format_size;

#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// Dataset URL (default: config `download.url`)
    #[arg(long)]
    pub url: Option<String>,

    /// Destination file (default: ~/.volodex/AtomicCards.json.xz)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: DownloadArgs, config: &VolodexConfig) -> Result<()> {
    let url = args.url.unwrap_or_else(|| config.download.url.clone());
    let output = args.output.unwrap_or_else(|| config.bulk_path());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let bytes = runtime.block_on(fetch(&url, &output))?;

    println!("Saved {} to {}", format_size(bytes), output.display());
    Ok(())
}

/// Stream `url` into `output`. The file only appears once the transfer completes.
pub async fn fetch(url: &str, output: &Path) -> Result<u64> {
    let url = url::Url::parse(url).with_context(|| format!("Invalid download URL: {}", url))?;
    info!(%url, output = %output.display(), "downloading bulk dataset");

    if let Some(parent) = output.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let client = reqwest::Client::new();
    let mut response = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("Failed to request {}", url))?;

    let status = response.status();
    if !status.is_success() {
        bail!("Download failed: {} returned {}", url, status);
    }

    let progress = progress_bar(response.content_length());
    let partial = partial_path(output);
    let mut file = tokio::fs::File::create(&partial)
        .await
        .with_context(|| format!("Failed to create {}", partial.display()))?;

    let mut written: u64 = 0;
    while let Some(chunk) = response
        .chunk()
        .await
        .with_context(|| format!("Transfer from {} interrupted", url))?
    {
        file.write_all(&chunk)
            .await
            .with_context(|| format!("Failed to write {}", partial.display()))?;
        written += chunk.len() as u64;
        progress.set_position(written);
    }
    file.flush().await?;
    drop(file);

    tokio::fs::rename(&partial, output)
        .await
        .with_context(|| format!("Failed to move download into {}", output.display()))?;
    progress.finish_and_clear();

    info!(bytes = written, "download complete");
    Ok(written)
}

fn progress_bar(total: Option<u64>) -> ProgressBar {
    match total {
        Some(len) => {
            let bar = ProgressBar::new(len);
            let style = ProgressStyle::with_template(
                "{spinner} [{elapsed_precise}] {wide_bar} {bytes}/{total_bytes} ({bytes_per_sec})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar());
            bar.set_style(style);
            bar
        }
        None => {
            let spinner = ProgressBar::new_spinner();
            let style = ProgressStyle::with_template("{spinner} {bytes} ({bytes_per_sec})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner());
            spinner.set_style(style);
            spinner
        }
    }
}

fn partial_path(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    output.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_path() {
        assert_eq!(
            partial_path(Path::new("/data/AtomicCards.json.xz")),
            PathBuf::from("/data/AtomicCards.json.xz.part")
        );
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let temp = tempfile::TempDir::new().unwrap();
        let err = runtime
            .block_on(fetch("not a url", &temp.path().join("out.xz")))
            .unwrap_err();
        assert!(err.to_string().contains("Invalid download URL"));
    }
}
