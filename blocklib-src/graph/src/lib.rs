//! Tree algorithms.

inner::reexport_crates! { k_paths }
