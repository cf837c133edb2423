/// How strictly a header is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum HeaderValidationMode {
    /// No header validation.
    #[display("NONE")]
    None,
    /// Validate the header against its parent only, without requiring the rest of its ancestry
    /// to be available. Used for blocks that are already connected to the local chain.
    #[display("DETACHED_ONLY")]
    DetachedOnly,
    /// Validate the header assuming its full chain context is available. Used when importing
    /// blocks that are not yet known to have a complete ancestry, e.g. during sync.
    #[display("FULL")]
    Full,
}

impl HeaderValidationMode {
    /// Returns `true` if the mode skips validation altogether.
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// How strictly a block body is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BodyValidationMode {
    /// Structural checks that can be derived from the header alone, no execution required.
    #[display("LIGHT")]
    Light,
    /// Checks that require the outputs of executing the block.
    #[display("FULL")]
    Full,
}
