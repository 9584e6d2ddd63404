inner::reexport_crates! { step_sum }
