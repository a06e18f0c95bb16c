// Copyright 2026 The studyhub developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! studyhub-core: Core library for the studyhub content viewer.
//!
//! This library provides the I/O-free types and algorithms for:
//! - The content document model (topics, sections, metadata)
//! - The markup-to-HTML formatting pipeline
//! - Topic curation (the exclusion list)
//! - Viewer state and its transitions

pub mod curation;
pub mod document;
pub mod error;
pub mod format;
pub mod hub;
pub mod token;

// Re-exports for convenience
pub use document::{ContentDocument, Difficulty, Metadata, Section, Topic};
pub use document::{fallback_document, parse_document};
pub use error::{ErrorReport, Fallible, fail};
pub use format::format_content;
pub use hub::{DocumentSource, HubSnapshot, HubState, InstallReport, SelectError};
pub use token::FreshnessToken;
