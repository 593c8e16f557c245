/// The user-facing side effects a page can trigger.
///
/// In a browser these are `alert`, `confirm` and `window.location`; the
/// terminal driver and the tests supply their own implementations.
pub trait Ui: Send + Sync {
    /// Blocking notice shown to the user.
    fn alert(&self, message: &str);

    /// Yes/no question; `false` means the action is abandoned.
    fn confirm(&self, message: &str) -> bool;

    /// Leave the current page.
    fn navigate(&self, location: &str);
}
