//! Block-decomposed range structures.

inner::reexport_crates! {
    block_layout,
    sqrt_bucket,
    block_index,
    block_frequency,
    sorted_buckets,
}
