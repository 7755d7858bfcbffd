// Learnify Configuration
// Copyright (c) 2026 Xing_The_Creator | Learnify
//
// Everything the app needs at startup, read once from the environment
// (a `.env` file is honoured via dotenv) and then passed around by value.

use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_VIDEO_DIR: &str = "videos/";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MODEL: &str = "distilgpt2";
pub const DEFAULT_HF_API_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_MAX_LENGTH: u32 = 150;
pub const DEFAULT_TTS_LANG: &str = "en";
pub const DEFAULT_TTS_URL: &str = "https://translate.google.com/translate_tts";
pub const DEFAULT_AUDIO_OUT: &str = "output_audio.mp3";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Hosted text-generation settings.
#[derive(Debug, Clone)]
pub struct TextGenConfig {
    pub api_url: String,
    pub model: String,
    pub max_length: u32,
    pub timeout_secs: u64,
    /// Hugging Face access token. No token, no generator.
    pub token: Option<String>,
}

/// Text-to-speech settings.
#[derive(Debug, Clone)]
pub struct SpeechConfig {
    pub endpoint: String,
    pub lang: String,
    pub output: PathBuf,
}

#[derive(Debug, Clone)]
pub struct LearnifyConfig {
    pub video_dir: PathBuf,
    pub port: u16,
    pub text_gen: TextGenConfig,
    pub speech: SpeechConfig,
}

impl Default for LearnifyConfig {
    fn default() -> Self {
        Self {
            video_dir: PathBuf::from(DEFAULT_VIDEO_DIR),
            port: DEFAULT_PORT,
            text_gen: TextGenConfig {
                api_url: DEFAULT_HF_API_URL.to_string(),
                model: DEFAULT_MODEL.to_string(),
                max_length: DEFAULT_MAX_LENGTH,
                timeout_secs: DEFAULT_TIMEOUT_SECS,
                token: None,
            },
            speech: SpeechConfig {
                endpoint: DEFAULT_TTS_URL.to_string(),
                lang: DEFAULT_TTS_LANG.to_string(),
                output: PathBuf::from(DEFAULT_AUDIO_OUT),
            },
        }
    }
}

impl LearnifyConfig {
    /// Load from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary key lookup (tests pass a closure over a map).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = get("HF_TOKEN").or_else(|| get("HUGGINGFACE_TOKEN"));

        Self {
            video_dir: get("LEARNIFY_VIDEO_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.video_dir),
            port: parse_or("LEARNIFY_PORT", get("LEARNIFY_PORT"), defaults.port),
            text_gen: TextGenConfig {
                api_url: get("LEARNIFY_HF_API_URL").unwrap_or(defaults.text_gen.api_url),
                model: get("LEARNIFY_MODEL").unwrap_or(defaults.text_gen.model),
                max_length: parse_or(
                    "LEARNIFY_MAX_LENGTH",
                    get("LEARNIFY_MAX_LENGTH"),
                    defaults.text_gen.max_length,
                ),
                timeout_secs: parse_or(
                    "LEARNIFY_TIMEOUT_SECS",
                    get("LEARNIFY_TIMEOUT_SECS"),
                    defaults.text_gen.timeout_secs,
                ),
                token,
            },
            speech: SpeechConfig {
                endpoint: get("LEARNIFY_TTS_URL").unwrap_or(defaults.speech.endpoint),
                lang: get("LEARNIFY_TTS_LANG").unwrap_or(defaults.speech.lang),
                output: get("LEARNIFY_AUDIO_OUT")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.speech.output),
            },
        }
    }

    pub fn has_token(&self) -> bool {
        self.text_gen.token.is_some()
    }
}

fn parse_or<T: FromStr + Copy>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!("[CONFIG] Ignoring unparseable {}={:?}", key, value);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_env_empty() {
        let cfg = LearnifyConfig::from_lookup(lookup_from(&[]));
        assert_eq!(cfg.video_dir, PathBuf::from("videos/"));
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.text_gen.model, "distilgpt2");
        assert_eq!(cfg.text_gen.max_length, 150);
        assert_eq!(cfg.speech.lang, "en");
        assert_eq!(cfg.speech.output, PathBuf::from("output_audio.mp3"));
        assert!(!cfg.has_token());
    }

    #[test]
    fn test_overrides() {
        let cfg = LearnifyConfig::from_lookup(lookup_from(&[
            ("LEARNIFY_VIDEO_DIR", "/srv/lessons"),
            ("LEARNIFY_PORT", "8080"),
            ("LEARNIFY_MODEL", "gpt2"),
            ("LEARNIFY_TTS_LANG", "fr"),
            ("HF_TOKEN", "hf_abc"),
        ]));
        assert_eq!(cfg.video_dir, PathBuf::from("/srv/lessons"));
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.text_gen.model, "gpt2");
        assert_eq!(cfg.speech.lang, "fr");
        assert_eq!(cfg.text_gen.token.as_deref(), Some("hf_abc"));
    }

    #[test]
    fn test_token_fallback_and_blank_values() {
        let cfg = LearnifyConfig::from_lookup(lookup_from(&[
            ("HF_TOKEN", "  "),
            ("HUGGINGFACE_TOKEN", "hf_fallback"),
        ]));
        assert_eq!(cfg.text_gen.token.as_deref(), Some("hf_fallback"));
    }

    #[test]
    fn test_bad_number_falls_back() {
        let cfg = LearnifyConfig::from_lookup(lookup_from(&[("LEARNIFY_PORT", "eighty")]));
        assert_eq!(cfg.port, DEFAULT_PORT);
    }
}
