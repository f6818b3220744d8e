//! Property tests that drive every tree through its public API only.

mod avl;
mod complete;
mod ordered;
mod red_black;

/// Sends trace output to the test harness.
pub(crate) fn init_logging() {
    let _ = simplelog::TestLogger::init(simplelog::LevelFilter::Trace, simplelog::Config::default());
}

/// Removes every copy of each of `deletes` from `xs`, in place.
pub(crate) fn remove_all<T: PartialEq>(xs: &mut Vec<T>, deletes: &[T]) {
    for delete in deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = xs.iter().position(|x| x == delete) {
            xs.swap_remove(pos);
        }
    }
}
