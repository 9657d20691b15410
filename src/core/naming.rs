//! Output file naming and build revision helpers

/// Revision string baked in at build time (see `build.rs`)
pub const REVISION: &str = match option_env!("RUNCONF_REVISION") {
    Some(rev) => rev,
    None => "unknown",
};

/// Get the revision string of this build
pub fn revision() -> &'static str {
    REVISION
}

/// Zero-pad `index` to as many digits as `max_index` has.
///
/// Used to build sortable numbered output names such as `frame_007.dat`.
/// If `index` already has more digits than `max_index`, it is returned as is.
pub fn file_numbering(index: u32, max_index: u32) -> String {
    let width = digit_count(max_index);
    format!("{:0width$}", index, width = width)
}

fn digit_count(n: u32) -> usize {
    if n == 0 {
        1
    } else {
        n.ilog10() as usize + 1
    }
}
