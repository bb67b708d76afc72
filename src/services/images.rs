use futures::StreamExt;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Image request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Image endpoint returned HTTP {0}")]
    Status(u16),
}

/// Streams an image resource and returns its size in bytes.
///
/// A terminal cell cannot show the pixels, so the bytes are counted and
/// dropped; the size is what the lazy image cell displays once loaded.
/// Callers are responsible for requesting each URI at most once.
pub async fn fetch_image_size(client: &Client, url: &str) -> Result<u64, ImageError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ImageError::Status(status.as_u16()));
    }

    let mut stream = response.bytes_stream();
    let mut total: u64 = 0;
    while let Some(chunk) = stream.next().await {
        total += chunk?.len() as u64;
    }

    debug!(url, bytes = total, "image resource loaded");
    Ok(total)
}
