// Learnify Shared State
// Copyright (c) 2026 Xing_The_Creator | Learnify

use anyhow::Result;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::agent::text_generation::TextGenerator;
use crate::agent::voice::TTSEngine;
use crate::config::LearnifyConfig;
use crate::resolver::TopicResolver;

/// Read-only state shared by every request handler.
pub struct LearnifyState {
    pub resolver: TopicResolver,
    pub video_dir: PathBuf,
    pub generator: Option<TextGenerator>,
    pub tts: TTSEngine,
}

impl LearnifyState {
    pub fn new(config: &LearnifyConfig) -> Result<Self> {
        let generator = if config.has_token() {
            let generator = TextGenerator::from_config(&config.text_gen)?;
            info!("[STATE] Text generation enabled ({})", generator.model());
            Some(generator)
        } else {
            warn!("[STATE] No Hugging Face token; text generation disabled");
            None
        };

        Ok(Self {
            resolver: TopicResolver::builtin(&config.video_dir),
            video_dir: config.video_dir.clone(),
            generator,
            tts: TTSEngine::new(&config.speech)?,
        })
    }
}
