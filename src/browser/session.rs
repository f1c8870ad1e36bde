use crate::{browser::config::{ConnectionOptions, LaunchOptions},
            canvas::encode_png_data_url,
            capture::{CaptureResponse, PageContext, ViewportCapture, ViewportCaptureRequest},
            dom::{DomTree, ElementNode, LogicalSize},
            error::{CaptureError, Result}};
use async_trait::async_trait;
use headless_chrome::{Browser, Tab, protocol::cdp::Page::CaptureScreenshotFormatOption};
use std::{ffi::OsStr, sync::Arc, time::Duration};

/// Browser session that manages a Chrome/Chromium instance
pub struct BrowserSession {
    /// The underlying headless_chrome Browser instance
    browser: Browser,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Ignore default arguments to prevent detection by anti-bot services
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        // Keep the session alive between user-triggered captures
        launch_opts.idle_browser_timeout = Duration::from_secs(60 * 60);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));

        if let Some(path) = options.chrome_path {
            launch_opts.path = Some(path);
        }

        if let Some(dir) = options.user_data_dir {
            launch_opts.user_data_dir = Some(dir);
        }

        launch_opts.sandbox = options.sandbox;

        let browser = Browser::new(launch_opts).map_err(|e| CaptureError::LaunchFailed(e.to_string()))?;

        browser.new_tab().map_err(|e| CaptureError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Self { browser })
    }

    /// Connect to an existing browser instance via WebSocket
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        let browser = Browser::connect_with_timeout(options.ws_url, Duration::from_millis(options.timeout))
            .map_err(|e| CaptureError::ConnectionFailed(e.to_string()))?;

        Ok(Self { browser })
    }

    /// Launch a browser with default options
    pub fn new() -> Result<Self> {
        Self::launch(LaunchOptions::default())
    }

    /// Get the active tab
    pub fn tab(&self) -> Result<Arc<Tab>> {
        self.get_active_tab()
    }

    /// Get all tabs
    pub fn get_tabs(&self) -> Result<Vec<Arc<Tab>>> {
        let tabs = self
            .browser
            .get_tabs()
            .lock()
            .map_err(|e| CaptureError::TabOperationFailed(format!("Failed to get tabs: {}", e)))?
            .clone();

        Ok(tabs)
    }

    /// Get the tab the user is looking at, judged by document visibility and focus
    pub fn get_active_tab(&self) -> Result<Arc<Tab>> {
        let tabs = self.get_tabs()?;

        // Visible and focused first, then merely visible
        for check in [
            "document.visibilityState === 'visible' && document.hasFocus()",
            "document.visibilityState === 'visible'",
        ] {
            for tab in &tabs {
                match tab.evaluate(check, false) {
                    Ok(remote_object) => {
                        if remote_object.value.and_then(|v| v.as_bool()).unwrap_or(false) {
                            return Ok(tab.clone());
                        }
                    }
                    Err(e) => {
                        log::debug!("Failed to check tab status: {}", e);
                        continue;
                    }
                }
            }
        }

        Err(CaptureError::TabOperationFailed("No active tab found".to_string()))
    }

    /// Get the underlying Browser instance
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Navigate to a URL using the active tab
    pub fn navigate(&self, url: &str) -> Result<()> {
        self.tab()?
            .navigate_to(url)
            .map_err(|e| CaptureError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;

        Ok(())
    }

    /// Wait for navigation to complete
    pub fn wait_for_navigation(&self) -> Result<()> {
        self.tab()?
            .wait_until_navigated()
            .map_err(|e| CaptureError::NavigationFailed(format!("Navigation timeout: {}", e)))?;

        Ok(())
    }

    /// Snapshot the DOM of the active tab
    pub fn extract_dom(&self) -> Result<DomTree> {
        DomTree::from_tab(&self.tab()?)
    }

    /// Snapshot the first element matching `css_selector` in the active tab
    pub fn extract_element(&self, css_selector: &str) -> Result<ElementNode> {
        crate::dom::extract_element(&self.tab()?, css_selector)
    }

    /// Logical size of the active tab's viewport
    pub fn viewport_size(&self) -> Result<LogicalSize> {
        let value = self.evaluate_json("JSON.stringify({width: window.innerWidth, height: window.innerHeight})")?;
        serde_json::from_str(&value)
            .map_err(|e| CaptureError::EvaluationFailed(format!("Unexpected viewport size {}: {}", value, e)))
    }

    /// Evaluate an expression that returns a string and hand back that string
    fn evaluate_json(&self, expression: &str) -> Result<String> {
        let result = self
            .tab()?
            .evaluate(expression, false)
            .map_err(|e| CaptureError::EvaluationFailed(e.to_string()))?;

        result
            .value
            .and_then(|v| v.as_str().map(str::to_string))
            .ok_or_else(|| CaptureError::EvaluationFailed(format!("No string returned from {}", expression)))
    }

    /// Close the browser
    pub fn close(&self) -> Result<()> {
        // Browser has no public close; dropping it ends the process, so close the tabs
        let tabs = self.get_tabs()?;
        for tab in tabs {
            let _ = tab.close(false); // Ignore errors on individual tab closes
        }
        Ok(())
    }
}

#[async_trait]
impl ViewportCapture for BrowserSession {
    async fn capture_visible_viewport(&self, _request: ViewportCaptureRequest) -> CaptureResponse {
        let tab = match self.tab() {
            Ok(tab) => tab,
            Err(e) => return CaptureResponse::failure(e.to_string()),
        };

        // The protocol call blocks until the browser answers
        let screenshot = tokio::task::spawn_blocking(move || {
            tab.capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, true)
                .map_err(|e| e.to_string())
        })
        .await;

        match screenshot {
            Ok(Ok(png)) => CaptureResponse::success(encode_png_data_url(&png)),
            Ok(Err(e)) => CaptureResponse::failure(e),
            Err(e) => CaptureResponse::failure(format!("Capture task failed: {}", e)),
        }
    }
}

impl PageContext for BrowserSession {
    fn logical_viewport(&self) -> Result<LogicalSize> {
        self.viewport_size()
    }

    fn snapshot_document(&self) -> Result<DomTree> {
        self.extract_dom()
    }

    fn base_url(&self) -> Option<String> {
        self.evaluate_json("document.baseURI").ok()
    }
}
