use crate::error::SolveResult;
use crate::optimizer::{NoopObserver, SearchOptions, SearchOutcome, StepObserver, StepSearch};
use crate::raster::{self, ImageExtension};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Base64 of `{}`; the answer sent when nothing was solved.
pub const EMPTY_ANSWER: &str = "e30=";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum CaptchaStatus {
    Ok,
    Error,
}

/// Content bundle for the slider variant, as returned by the captcha service.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CaptchaContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CaptchaStatus>,
    #[serde(default)]
    pub extension: ImageExtension,
    /// Base64 encoded scrambled image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub steps: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
}

impl CaptchaContent {
    pub fn from_json(data: &str) -> SolveResult<Self> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SolveResult<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    fn image_data(&self) -> Option<&str> {
        self.image.as_deref().filter(|s| !s.trim().is_empty())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SolveOutcome {
    pub step_count: usize,
    pub selected_swaps: Vec<i64>,
}

impl From<SearchOutcome> for SolveOutcome {
    fn from(o: SearchOutcome) -> Self {
        Self {
            step_count: o.best_step,
            selected_swaps: o.best_swaps,
        }
    }
}

/// Service: solve with default options (5×5 grid, 50 steps).
pub fn solve(content: &CaptchaContent) -> SolveResult<SolveOutcome> {
    let outcome = solve_with(content, &SearchOptions::default(), &mut NoopObserver)?;
    Ok(outcome.into())
}

/// Service: solve with explicit options, reporting each step to `observer`.
///
/// A missing image or an empty sequence is the zero-step result, not an error.
pub fn solve_with<O: StepObserver>(
    content: &CaptchaContent,
    options: &SearchOptions,
    observer: &mut O,
) -> SolveResult<SearchOutcome> {
    let Some(data) = content.image_data() else {
        debug!("No image in content bundle; nothing to solve");
        return Ok(SearchOutcome::default());
    };
    if content.steps.is_empty() {
        debug!("Empty swap sequence; nothing to solve");
        return Ok(SearchOutcome::default());
    }

    let image = raster::decode_base64(data)?;
    debug!(
        "Decoded {}x{} {} image, {} raw steps",
        image.width(),
        image.height(),
        content.extension,
        content.steps.len()
    );

    StepSearch::new(options.clone()).run(&image, &content.steps, observer)
}

/// Builds the `answer` field for the verification call: base64 of `{"value": swaps}`.
pub fn encode_answer(swaps: &[i64]) -> SolveResult<String> {
    let payload = serde_json::to_vec(&json!({ "value": swaps }))?;
    Ok(STANDARD.encode(payload))
}
