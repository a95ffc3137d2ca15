//! Error types shared by the board subsystems.

use thiserror::Error;

use crate::pieces::ItemId;

/// A color string that is not `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Wrong length or non-hex characters.
    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidHex(String),
}

/// Construction-time failures. Fatal to the component being built.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The background grid color could not be parsed.
    #[error("grid color rejected: {source}")]
    InvalidGridColor {
        /// Underlying parse failure.
        #[source]
        source: ColorError,
    },
    /// Hex size must be a positive finite number.
    #[error("hex size must be positive, got {0}")]
    InvalidHexSize(f32),
}

/// Per-item failures of the data link. The offending item is skipped,
/// the rest of the batch is still emitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    /// A clone referenced an id with no registered drawn item.
    #[error("item {item} clones {source_id}, which is not registered")]
    UnresolvedCloneSource {
        /// Id of the clone item.
        item: ItemId,
        /// The missing `clones_id`.
        source_id: ItemId,
    },
    /// The factory could not build a drawn item.
    #[error("item {item} could not be drawn")]
    InvalidItem {
        /// Id of the rejected item.
        item: ItemId,
        /// Why the factory refused it.
        #[source]
        source: ColorError,
    },
}
