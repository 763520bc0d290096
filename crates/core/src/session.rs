//! Browser session lifecycle and persisted authentication state.
//!
//! A [`Session`] owns the Chromium process, the CDP event handler task, and
//! one page. Cookies are injected from the durable store on open and written
//! back on close, so a single interactive login survives across runs.
//!
//! Closing must run on every exit path; callers hold the session, run the
//! collector, and close afterwards regardless of the collection outcome. If a
//! run is torn down without reaching [`Session::close`], chromiumoxide kills
//! the child process when the `Browser` is dropped, so no OS-level browser
//! process outlives the run.

use std::path::PathBuf;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::CookieParam;
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::collect::{Browse, HOME_URL};
use crate::{Result, TripnotesError};

const COOKIES_FILE: &str = ".tripnotes_cookies.json";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Launch settings for a browsing session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Run without a visible window. Interactive login requires a head.
    pub headless: bool,
    /// User-agent override applied to the page.
    pub user_agent: String,
    /// Window size; a realistic desktop viewport.
    pub window: (u32, u32),
    /// Durable cookie store location.
    pub cookies_path: PathBuf,
}

impl SessionConfig {
    /// Config with the default cookie store in the operator's home directory.
    pub fn new(headless: bool) -> Result<Self> {
        let home = dirs::home_dir().ok_or(TripnotesError::NoHomeDir)?;
        Ok(Self {
            headless,
            user_agent: USER_AGENT.to_string(),
            window: (1920, 1080),
            cookies_path: home.join(COOKIES_FILE),
        })
    }
}

/// An open browsing session.
pub struct Session {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    cookies_path: PathBuf,
}

impl Session {
    /// Launches the browser and prepares an authenticated-if-possible page.
    ///
    /// Automation-detection signals are suppressed via launch flags, and
    /// persisted cookies are injected before any navigation. Launch failure
    /// is fatal ([`TripnotesError::Launch`]).
    pub async fn open(config: SessionConfig) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .window_size(config.window.0, config.window.1)
            .args(vec![
                "--disable-blink-features=AutomationControlled",
                "--disable-dev-shm-usage",
                "--no-first-run",
            ]);
        if !config.headless {
            builder = builder.with_head();
        }
        let browser_config = builder.build().map_err(TripnotesError::Launch)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| TripnotesError::Launch(e.to_string()))?;

        let handler = tokio::task::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser.new_page("about:blank").await?;
        page.set_user_agent(config.user_agent.as_str()).await?;

        let session =
            Self { browser, page, handler, cookies_path: config.cookies_path };
        session.inject_cookies().await?;

        Ok(session)
    }

    /// Navigates to the landing page and blocks until the operator confirms
    /// login on stdin. No timeout: completion is operator-controlled.
    ///
    /// The session is considered authenticated afterwards without further
    /// verification.
    pub async fn interactive_login(&self) -> Result<()> {
        info!(url = HOME_URL, "Opening landing page for login");
        self.page.goto(HOME_URL).await?;
        self.page.wait_for_navigation().await?;

        println!("\n>>> Please log in in the browser window, then press Enter here...");
        tokio::task::spawn_blocking(|| {
            let mut line = String::new();
            std::io::stdin().read_line(&mut line).map(|_| ())
        })
        .await
        .map_err(|e| TripnotesError::Browser(e.to_string()))??;

        info!("Login confirmed by operator");
        Ok(())
    }

    /// Persists cookies and releases the browser.
    ///
    /// The browser shutdown runs even when cookie capture or persistence
    /// fails; the first error is surfaced afterwards. The session is consumed:
    /// no operation is valid after close.
    pub async fn close(mut self) -> Result<()> {
        let persisted = self.persist_cookies().await;

        if let Err(e) = self.browser.close().await {
            warn!(error = %e, "Browser did not close cleanly");
        }
        let _ = self.browser.wait().await;
        self.handler.abort();

        persisted
    }

    async fn inject_cookies(&self) -> Result<()> {
        if !self.cookies_path.exists() {
            return Ok(());
        }

        let contents = std::fs::read_to_string(&self.cookies_path)?;
        let cookies: Vec<CookieParam> = match serde_json::from_str(&contents) {
            Ok(cookies) => cookies,
            Err(e) => {
                warn!(path = %self.cookies_path.display(), error = %e,
                      "Cookie store unreadable, continuing unauthenticated");
                return Ok(());
            }
        };

        let count = cookies.len();
        self.page.set_cookies(cookies).await?;
        info!(path = %self.cookies_path.display(), count, "Loaded cookies");
        Ok(())
    }

    async fn persist_cookies(&self) -> Result<()> {
        let cookies = self.page.get_cookies().await?;
        let json = serde_json::to_string_pretty(&cookies)?;
        std::fs::write(&self.cookies_path, json)?;
        info!(path = %self.cookies_path.display(), count = cookies.len(), "Cookies saved");
        Ok(())
    }
}

#[async_trait]
impl Browse for Session {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.page.goto(url).await?;
        self.page.wait_for_navigation().await?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.page.url().await?.unwrap_or_default())
    }

    async fn html(&self) -> Result<String> {
        Ok(self.page.content().await?)
    }

    async fn scroll_by(&self, pixels: u32) -> Result<()> {
        self.page.evaluate(format!("window.scrollBy(0, {pixels})")).await?;
        Ok(())
    }
}
