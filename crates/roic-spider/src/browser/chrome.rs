use super::{Browser, Session};
use crate::{Config, Error, Result};
use async_trait::async_trait;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::{Child, Command};
use tracing::{debug, error, trace, warn};

/// How often chromedriver is polled while it starts up.
const STARTUP_POLL: Duration = Duration::from_millis(100);

/// Chrome, driven through a chromedriver child process per session.
#[derive(Clone, Debug)]
pub struct Chrome {
    driver_path: PathBuf,
    headless: bool,
    startup: Duration,
}

impl Chrome {
    pub fn new(driver_path: impl Into<PathBuf>) -> Self {
        Self {
            driver_path: driver_path.into(),
            headless: true,
            startup: Duration::from_secs(10),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            driver_path: config.chrome_driver_path.clone(),
            headless: config.headless,
            startup: config.driver_startup(),
        }
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    fn capabilities(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut args = vec!["--disable-gpu"];
        if self.headless {
            args.push("--headless=new");
        }

        let mut caps = serde_json::Map::new();
        caps.insert("browserName".to_string(), json!("chrome"));
        caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
        caps
    }

    fn spawn_driver(&self, port: u16) -> Result<Child> {
        trace!("spawning {:?} on port {port}", self.driver_path);
        Command::new(&self.driver_path)
            .arg(format!("--port={port}"))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| {
                error!("failed to launch chromedriver at {:?}, error({source})", self.driver_path);
                Error::DriverLaunch {
                    path: self.driver_path.clone(),
                    source,
                }
            })
    }

    /// Connect to a freshly spawned chromedriver, waiting for it to listen.
    async fn connect(&self, port: u16) -> Result<Client> {
        let addr = format!("http://127.0.0.1:{port}");
        let mut builder = ClientBuilder::native();
        builder.capabilities(self.capabilities());

        let deadline = tokio::time::Instant::now() + self.startup;
        loop {
            match builder.connect(&addr).await {
                Ok(client) => return Ok(client),
                Err(err) if tokio::time::Instant::now() >= deadline => {
                    error!("chromedriver at {addr} never accepted a session, error({err})");
                    return Err(err.into());
                }
                Err(err) => trace!("chromedriver not ready yet, error({err})"),
            }
            tokio::time::sleep(STARTUP_POLL).await;
        }
    }
}

#[async_trait]
impl Browser for Chrome {
    async fn open(&self, url: &str) -> Result<Box<dyn Session>> {
        let time = std::time::Instant::now();

        let port = free_port().map_err(|source| Error::DriverLaunch {
            path: self.driver_path.clone(),
            source,
        })?;
        let mut driver = self.spawn_driver(port)?;

        let client = match self.connect(port).await {
            Ok(client) => client,
            Err(err) => {
                if let Err(kill) = driver.kill().await {
                    warn!("failed to kill chromedriver, error({kill})");
                }
                return Err(err);
            }
        };

        let session = ChromeSession { client, driver };
        let navigated = session.client.goto(url).await;
        if let Err(err) = navigated {
            error!("failed to navigate to {url}, error({err})");
            let session: Box<dyn Session> = Box::new(session);
            if let Err(close) = session.close().await {
                warn!("failed to close browser session, error({close})");
            }
            return Err(err.into());
        }

        debug!("browser session opened at {url}. {}", crate::time_elapsed(time));
        Ok(Box::new(session))
    }
}

/// A live webdriver session and the chromedriver process behind it.
///
/// The driver is killed on drop as well as on [`close`](Session::close).
struct ChromeSession {
    client: Client,
    driver: Child,
}

impl ChromeSession {
    async fn find(
        &mut self,
        xpath: &str,
        wait: Option<Duration>,
    ) -> Result<Option<fantoccini::elements::Element>> {
        let found = match wait {
            Some(timeout) => {
                self.client
                    .wait()
                    .at_most(timeout)
                    .for_element(Locator::XPath(xpath))
                    .await
            }
            None => self.client.find(Locator::XPath(xpath)).await,
        };

        match found {
            Ok(element) => Ok(Some(element)),
            Err(err) if is_absent(&err) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl Session for ChromeSession {
    async fn text(&mut self, xpath: &str, wait: Option<Duration>) -> Result<Option<String>> {
        match self.find(xpath, wait).await? {
            Some(element) => Ok(Some(element.text().await?)),
            None => Ok(None),
        }
    }

    async fn click(&mut self, xpath: &str, wait: Option<Duration>, scroll: bool) -> Result<bool> {
        let Some(element) = self.find(xpath, wait).await? else {
            return Ok(false);
        };

        if scroll {
            self.client
                .execute(
                    "arguments[0].scrollIntoView({block: 'center'});",
                    vec![serde_json::to_value(&element)?],
                )
                .await?;
        }
        element.click().await?;

        Ok(true)
    }

    async fn close(self: Box<Self>) -> Result<()> {
        let ChromeSession { client, mut driver } = *self;

        let closed = client.close().await;
        if let Err(err) = driver.kill().await {
            warn!("failed to kill chromedriver, error({err})");
        }
        closed?;

        debug!("browser session closed");
        Ok(())
    }
}

/// An element that is not on the page, immediately or within the wait.
fn is_absent(err: &CmdError) -> bool {
    err.is_no_such_element() || matches!(err, CmdError::WaitTimeout)
}

/// Ask the OS for a port nobody is listening on.
fn free_port() -> std::io::Result<u16> {
    let listener = std::net::TcpListener::bind(("127.0.0.1", 0))?;
    Ok(listener.local_addr()?.port())
}
