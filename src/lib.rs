// Python Learnify Core
// Copyright (c) 2026 Xing_The_Creator | Learnify

pub mod agent;
pub mod config;
pub mod lesson;
pub mod media;
pub mod page;
pub mod resolver;
pub mod server;
pub mod state;
