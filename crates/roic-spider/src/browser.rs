use crate::Result;
use async_trait::async_trait;
use std::time::Duration;

mod chrome;

pub use chrome::Chrome;

/// Something that can open a page in a fresh browser session.
#[async_trait]
pub trait Browser: Send + Sync {
    /// Start a session and navigate it to `url`.
    async fn open(&self, url: &str) -> Result<Box<dyn Session>>;
}

/// One open page. Must be [`closed`](Session::close) once the caller is done.
#[async_trait]
pub trait Session: Send {
    /// Visible text of the element at `xpath`, or `None` when there is no such
    /// element. With `wait`, presence is polled for up to that long first.
    async fn text(&mut self, xpath: &str, wait: Option<Duration>) -> Result<Option<String>>;

    /// Click the element at `xpath`, scrolling it into view first if asked.
    /// Returns `false` when there is no such element.
    async fn click(&mut self, xpath: &str, wait: Option<Duration>, scroll: bool) -> Result<bool>;

    /// End the session and release the browser process.
    async fn close(self: Box<Self>) -> Result<()>;
}
