// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Errors at the boundary of the canvas engine.
///
/// Everything inside the engine (unknown uids, empty working sets, missing
/// measurements) is a silent no-op; only parsing input can fail.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// The entry document is not valid JSON.
    #[error("malformed entry document: {0}")]
    Json(#[from] serde_json::Error),

    /// The entry document is JSON but neither an array nor `{ "root": [...] }`.
    #[error("entry document must be an array or an object with a `root` array")]
    UnexpectedShape,

    /// The configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[source] serde_json::Error),
}
