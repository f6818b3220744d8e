
/// Routes `log` output through the test harness so `cargo test -- --nocapture` shows it.
pub(crate) fn init_logging() {
    // Only the first test to get here installs the logger; later calls fail harmlessly.
    let _ = simplelog::TestLogger::init(simplelog::LevelFilter::Trace, simplelog::Config::default());
}
