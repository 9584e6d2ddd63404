inner::reexport_crates! { index_bounds }
