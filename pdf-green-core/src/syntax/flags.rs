use bitflags::bitflags;

bitflags! {
    /// Per-node bit flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u8 {
        /// The node, or something below it, carries diagnostics
        const CONTAINS_DIAGNOSTICS = 1 << 0;
        /// The node was synthesized for input that was absent
        const IS_MISSING = 1 << 1;

        /// Flags a composite takes over from its children
        const INHERIT_MASK = Self::CONTAINS_DIAGNOSTICS.bits();
    }
}

impl NodeFlags {
    /// The subset of `self` a parent inherits.
    pub fn inherited(self) -> NodeFlags {
        self & NodeFlags::INHERIT_MASK
    }
}
