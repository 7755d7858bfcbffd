// Learnify Lesson Flow - Query → Playback Decision
// Copyright (c) 2026 Xing_The_Creator | Learnify
//
// Wraps the resolver with the checks that surround it on the page:
// empty input is refused before resolving, and a resolved video must exist
// on disk before it is handed to the player.

use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::resolver::{Resolution, TopicResolver};

pub const EMPTY_QUERY_MESSAGE: &str = "⚠️ Please enter a topic or question.";
pub const MISSING_ASSET_MESSAGE: &str = "❌ Video file does not exist.";
pub const TOPIC_UNAVAILABLE_MESSAGE: &str = "😔 Sorry, this topic is not available here. \
The platform is for Python beginners. Please ask about beginner-friendly topics like \
`print`, `if-else`, `loops`, `variables`, `break`, and `continue` statements.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[serde(rename = "ok")]
    Success,
    Warning,
    Error,
}

/// What the user sees after pressing Generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonOutcome {
    EmptyQuery,
    Play { asset: PathBuf },
    MissingAsset { asset: PathBuf },
    TopicUnavailable,
}

impl LessonOutcome {
    pub fn severity(&self) -> Severity {
        match self {
            LessonOutcome::Play { .. } => Severity::Success,
            LessonOutcome::EmptyQuery => Severity::Warning,
            LessonOutcome::MissingAsset { .. } | LessonOutcome::TopicUnavailable => {
                Severity::Error
            }
        }
    }

    pub fn message(&self) -> String {
        match self {
            LessonOutcome::EmptyQuery => EMPTY_QUERY_MESSAGE.to_string(),
            LessonOutcome::Play { asset } => format!("▶️ Playing {}", asset.display()),
            LessonOutcome::MissingAsset { .. } => MISSING_ASSET_MESSAGE.to_string(),
            LessonOutcome::TopicUnavailable => TOPIC_UNAVAILABLE_MESSAGE.to_string(),
        }
    }

    pub fn playable_asset(&self) -> Option<&PathBuf> {
        match self {
            LessonOutcome::Play { asset } => Some(asset),
            _ => None,
        }
    }
}

/// Run one Generate action.
///
/// Only the literal empty string counts as "no input"; whitespace goes
/// through to the resolver and simply fails to match.
pub fn prepare_lesson(resolver: &TopicResolver, query: &str) -> LessonOutcome {
    if query.is_empty() {
        warn!("[LESSON] Generate pressed with empty input");
        return LessonOutcome::EmptyQuery;
    }

    match resolver.resolve(query) {
        Resolution::Found(asset) => {
            if asset.exists() {
                info!("[LESSON] 🎬 Playing {:?} for '{}'", asset, query);
                LessonOutcome::Play { asset }
            } else {
                warn!("[LESSON] Resolved {:?} but the file is missing", asset);
                LessonOutcome::MissingAsset { asset }
            }
        }
        Resolution::NotFound => {
            info!("[LESSON] No lesson for '{}'", query);
            LessonOutcome::TopicUnavailable
        }
    }
}
