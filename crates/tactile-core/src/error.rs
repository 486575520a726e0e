//! Error types shared by every tactile crate.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WidgetError {
    /// An image or font file could not be opened or decoded.
    #[error("cannot load {}: {reason}", path.display())]
    ResourceNotFound { path: PathBuf, reason: String },

    #[error("justification was `{0}`; must be left, center, or right")]
    InvalidJustification(String),

    #[error("number of images {images} and number of durations {durations} do not match")]
    FrameCountMismatch { images: usize, durations: usize },

    #[error("an animation needs at least one frame")]
    EmptyAnimation,

    #[error("region {x},{y} {w}x{h} lies outside a {sheet_w}x{sheet_h} image")]
    RegionOutOfBounds {
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        sheet_w: u32,
        sheet_h: u32,
    },

    #[error("key `{0}` was not found in the image collection")]
    KeyNotFound(String),

    #[error("radio group `{0}` was not created")]
    UnknownGroup(String),

    /// A group was queried before any member was selected.
    #[error("no radio button was selected in group `{0}`")]
    NoSelection(String),
}

pub type Result<T> = std::result::Result<T, WidgetError>;
