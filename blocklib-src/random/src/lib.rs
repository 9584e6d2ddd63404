inner::reexport_crates! { randgen }
