//! Helpers shared by the category crates.

/// Re-exports each member crate both as a module and by its items, so that
/// `ds::BlockIndex` and `ds::block_index::BlockIndex` both resolve and
/// rustdoc renders the items inline.
#[macro_export]
macro_rules! reexport_crates {
    ( $($lib:ident),* $(,)? ) => { $(
        #[doc(inline)]
        pub use $lib::{self, *};
    )* };
}
