// Learnify Speech - Text → MP3
// Copyright (c) 2026 Xing_The_Creator | Learnify
//
// Talks to the same Google Translate TTS endpoint gTTS uses: text is cut into
// short chunks, each chunk is fetched as MP3, and the pieces are concatenated.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};
use url::Url;

use crate::config::SpeechConfig;

/// Longest chunk the endpoint accepts, in characters.
pub const MAX_CHUNK_CHARS: usize = 100;

const SENTENCE_END: &[char] = &['.', '!', '?', ';', ':', ','];

pub struct TTSEngine {
    client: reqwest::Client,
    endpoint: String,
    lang: String,
    default_output: PathBuf,
}

impl TTSEngine {
    pub fn new(config: &SpeechConfig) -> Result<Self> {
        Url::parse(&config.endpoint)
            .with_context(|| format!("Invalid TTS endpoint '{}'", config.endpoint))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent("Mozilla/5.0 (X11; Linux x86_64)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            lang: config.lang.clone(),
            default_output: config.output.clone(),
        })
    }

    /// Request URL for chunk `idx` of `total`.
    pub fn chunk_url(&self, chunk: &str, idx: usize, total: usize) -> Result<Url> {
        let params = [
            ("ie", "UTF-8".to_string()),
            ("q", chunk.to_string()),
            ("tl", self.lang.clone()),
            ("client", "tw-ob".to_string()),
            ("total", total.to_string()),
            ("idx", idx.to_string()),
            ("textlen", chunk.chars().count().to_string()),
        ];
        Url::parse_with_params(&self.endpoint, &params).context("Failed to build TTS URL")
    }

    /// Synthesize `text` and return the MP3 bytes.
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let chunks = split_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            bail!("No text to speak");
        }

        info!(
            "[TTS] Synthesizing {} chars in {} chunk(s) ({})",
            text.chars().count(),
            chunks.len(),
            self.lang
        );

        let total = chunks.len();
        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let url = self.chunk_url(chunk, idx, total)?;
            let resp = self
                .client
                .get(url)
                .send()
                .await
                .with_context(|| format!("TTS request failed for chunk {}", idx))?;

            let status = resp.status();
            if !status.is_success() {
                error!("[TTS] Endpoint returned {} for chunk {}", status, idx);
                bail!("TTS endpoint returned {} for chunk {}", status, idx);
            }

            let bytes = resp
                .bytes()
                .await
                .with_context(|| format!("Failed to read TTS audio for chunk {}", idx))?;
            audio.extend_from_slice(&bytes);
        }

        Ok(audio)
    }

    /// Synthesize `text` into an MP3 file. `None` writes to the configured default.
    pub async fn speak(&self, text: &str, output_path: Option<&Path>) -> Result<PathBuf> {
        let output = output_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.default_output.clone());

        let audio = self.synthesize(text).await?;

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }
        tokio::fs::write(&output, &audio)
            .await
            .with_context(|| format!("Failed to write audio to {:?}", output))?;

        info!("[TTS] Saved {} bytes -> {:?}", audio.len(), output);
        Ok(output)
    }
}

/// Split `text` into chunks of at most `max` characters.
///
/// Words are packed greedily, a chunk is closed early after sentence
/// punctuation once it is at least half full, and words longer than `max`
/// are hard-split.
pub fn split_text(text: &str, max: usize) -> Vec<String> {
    let max = max.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= max {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            chunks.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }

        if word.ends_with(SENTENCE_END) && current_len * 2 >= max {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
