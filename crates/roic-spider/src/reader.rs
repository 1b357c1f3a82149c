use crate::browser::Session;
use crate::{Error, Result};
use std::time::Duration;
use tracing::{error, trace};

/// How long to wait for an element, and what to call it in logs.
#[derive(Clone, Copy, Debug, Default)]
pub struct Wait<'a> {
    timeout: Option<Duration>,
    tag: Option<&'a str>,
}

impl<'a> Wait<'a> {
    /// A single immediate lookup.
    pub const NONE: Wait<'static> = Wait {
        timeout: None,
        tag: None,
    };

    /// Poll for presence for up to `timeout`.
    pub fn up_to(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            tag: None,
        }
    }

    /// Poll for presence for up to `timeout`, if given.
    pub fn maybe(timeout: Option<Duration>) -> Self {
        Self { timeout, tag: None }
    }

    /// Label included in the log line if the element never shows up.
    pub fn tagged(self, tag: &'a str) -> Self {
        Self {
            tag: Some(tag),
            ..self
        }
    }

    fn not_found(&self, xpath: &str) -> Error {
        error!("[failed xpath] {xpath}");
        if let Some(tag) = self.tag {
            error!("[tag] {tag}");
        }
        Error::NotFound {
            xpath: xpath.to_string(),
            tag: self.tag.map(str::to_string),
        }
    }
}

/// Visible text of the element at `xpath`.
///
/// - waited: a timeout is [`Error::NotFound`].
/// - immediate: absence is `Ok(None)`.
pub async fn read(session: &mut dyn Session, xpath: &str, wait: Wait<'_>) -> Result<Option<String>> {
    trace!("reading {xpath}");
    let text = session.text(xpath, wait.timeout).await?;
    match (text, wait.timeout) {
        (Some(text), _) => Ok(Some(text)),
        (None, Some(_)) => Err(wait.not_found(xpath)),
        (None, None) => Ok(None),
    }
}

/// Click the element at `xpath`; a missing element is always [`Error::NotFound`].
///
/// The click may navigate or load content; waiting for that is up to the caller.
pub async fn click(session: &mut dyn Session, xpath: &str, wait: Wait<'_>, scroll: bool) -> Result<()> {
    trace!("clicking {xpath}");
    if session.click(xpath, wait.timeout, scroll).await? {
        Ok(())
    } else {
        Err(wait.not_found(xpath))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Page {
        elements: HashMap<String, String>,
        clicked: Vec<(String, bool)>,
    }

    #[async_trait]
    impl Session for Page {
        async fn text(&mut self, xpath: &str, _wait: Option<Duration>) -> Result<Option<String>> {
            Ok(self.elements.get(xpath).cloned())
        }

        async fn click(&mut self, xpath: &str, _wait: Option<Duration>, scroll: bool) -> Result<bool> {
            let found = self.elements.contains_key(xpath);
            if found {
                self.clicked.push((xpath.to_string(), scroll));
            }
            Ok(found)
        }

        async fn close(self: Box<Self>) -> Result<()> {
            Ok(())
        }
    }

    fn page() -> Page {
        let mut page = Page::default();
        page.elements.insert("//span[1]".into(), "Revenue".into());
        page.elements.insert("//span[2]".into(), String::new());
        page
    }

    #[tokio::test]
    async fn immediate_miss_is_none() {
        let mut page = page();
        assert_eq!(read(&mut page, "//span[1]", Wait::NONE).await.unwrap().as_deref(), Some("Revenue"));
        assert_eq!(read(&mut page, "//span[9]", Wait::NONE).await.unwrap(), None);
    }

    #[tokio::test]
    async fn empty_text_is_not_missing() {
        let mut page = page();
        assert_eq!(read(&mut page, "//span[2]", Wait::NONE).await.unwrap(), Some(String::new()));
    }

    #[tokio::test]
    async fn waited_miss_is_an_error() {
        let mut page = page();
        let wait = Wait::up_to(Duration::from_millis(1)).tagged("summary");

        match read(&mut page, "//span[9]", wait).await {
            Err(Error::NotFound { xpath, tag }) => {
                assert_eq!(xpath, "//span[9]");
                assert_eq!(tag.as_deref(), Some("summary"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn click_passes_scroll_and_rejects_missing() {
        let mut page = page();
        click(&mut page, "//span[1]", Wait::NONE, true).await.unwrap();
        assert_eq!(page.clicked, [("//span[1]".to_string(), true)]);

        let err = click(&mut page, "//button", Wait::NONE, false).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }
}
