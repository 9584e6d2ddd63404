inner::reexport_crates! { quickselect }
