/// A collapsible log section for CI workflow output.
///
/// Prints `::group::<title>` on creation and `::endgroup::` when dropped.
#[must_use = "the group closes when this guard is dropped"]
pub struct LogGroup(());

impl LogGroup {
    pub fn start(title: impl std::fmt::Display) -> Self {
        println!("::group::{title}");
        Self(())
    }
}

impl Drop for LogGroup {
    fn drop(&mut self) {
        println!("::endgroup::");
    }
}
