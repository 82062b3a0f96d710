// Crate-internal.
// ---

pub(crate) mod sample_bills;

// Public exports.
// ---

pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod sample_bills {
        pub use crate::impl_ext::sample_bills::*;
    }
}
