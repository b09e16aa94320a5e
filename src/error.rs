use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which integrity check reported a [`MapError::SizeMismatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchStage {
    /// Decompressed byte buffer vs. `cells * 4`.
    Bytes,
    /// Decoded identifier count vs. `width * height`.
    Cells,
}

impl fmt::Display for MismatchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MismatchStage::Bytes => write!(f, "byte count"),
            MismatchStage::Cells => write!(f, "tile count"),
        }
    }
}

/// Error type for the TMX loader. Any error aborts the whole parse.
#[derive(Debug, Error)]
pub enum MapError {
    /// A required element is absent (root map, layer data, tile-set image).
    #[error("Missing '{element}' element{}", context_suffix(.context))]
    MissingElement {
        /// Name of the absent element.
        element: &'static str,
        /// Owner of the element, e.g. the layer or tile-set name.
        context: Option<String>,
    },

    /// An enum-like attribute holds a value outside the supported set.
    #[error("Unsupported {what} '{found}'. Only {supported} supported.")]
    UnsupportedFormat {
        /// Attribute being checked (version, orientation, encoding, compression).
        what: &'static str,
        /// The rejected value.
        found: String,
        /// Human readable list of accepted values.
        supported: &'static str,
    },

    /// Malformed scalar content: CSV token, base64 text or compressed stream.
    #[error("Malformed {what}: {detail}")]
    Format {
        /// Kind of content that failed to decode.
        what: &'static str,
        /// Decoder specific detail.
        detail: String,
    },

    /// Decoded element count disagrees with the declared dimensions.
    #[error("{stage} mismatch in layer '{layer}': expected {expected}, got {actual}")]
    SizeMismatch {
        /// Which of the two checks failed.
        stage: MismatchStage,
        /// Layer being decoded.
        layer: String,
        /// Count implied by the declared dimensions.
        expected: usize,
        /// Count actually decoded.
        actual: usize,
    },

    /// Caller supplied an unusable argument at the API boundary.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Argument name.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// The XML reader rejected the document structure.
    #[error("Invalid map document: {0}")]
    Document(#[from] quick_xml::DeError),

    /// I/O error while reading the document.
    #[error("I/O error{}: {source}", path_suffix(.path))]
    Io {
        /// File being read, if the document came from a path.
        path: Option<PathBuf>,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

fn context_suffix(context: &Option<String>) -> String {
    match context {
        Some(owner) => format!(" in '{owner}'"),
        None => String::new(),
    }
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" reading {}", p.display()),
        None => String::new(),
    }
}

impl MapError {
    pub(crate) fn missing(element: &'static str, context: Option<String>) -> Self {
        MapError::MissingElement {
            element,
            context,
        }
    }

    pub(crate) fn format(what: &'static str, detail: impl fmt::Display) -> Self {
        MapError::Format {
            what,
            detail: detail.to_string(),
        }
    }
}

/// Shorthand for results produced by this crate.
pub type Result<T> = std::result::Result<T, MapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_message_names_value_and_supported_set() {
        let err = MapError::UnsupportedFormat {
            what: "map version",
            found: "0.9".into(),
            supported: "version '1.0' is",
        };
        assert_eq!(
            err.to_string(),
            "Unsupported map version '0.9'. Only version '1.0' is supported."
        );
    }

    #[test]
    fn missing_element_mentions_owner() {
        let err = MapError::missing("image", Some("terrain".to_string()));
        assert_eq!(err.to_string(), "Missing 'image' element in 'terrain'");
        assert_eq!(
            MapError::missing("map", None).to_string(),
            "Missing 'map' element"
        );
    }
}
