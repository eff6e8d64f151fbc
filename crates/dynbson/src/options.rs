//! Codec configuration.

/// Default bound on conversion nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Options shared by [`Encoder`](crate::Encoder) and
/// [`Decoder`](crate::Decoder).
#[derive(Debug, Clone)]
pub struct CodecOptions {
    /// Maximum nesting depth before a conversion fails. Both directions
    /// recurse one frame per level, so this also bounds stack growth on
    /// adversarial input.
    pub max_depth: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        CodecOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
