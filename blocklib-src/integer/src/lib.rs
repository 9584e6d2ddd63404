//! Integer tricks.

inner::reexport_crates! { floor_blocks, word_set }
