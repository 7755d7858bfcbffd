// Learnify Agent Modules
// Copyright (c) 2026 Xing_The_Creator | Learnify
//
// Hosted integrations that sit beside the lesson flow.

pub mod text_generation;
pub mod voice;
