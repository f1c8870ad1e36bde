//! # page-capture
//!
//! Capture part of a live browser page as a portable artifact: a PNG bitmap of a
//! region or of the whole page, or a style-inlined HTML fragment of one element.
//!
//! ## Features
//!
//! - **Region capture**: crop a logical rectangle out of a screenshot of the visible
//!   viewport, scaling CSS pixels to device pixels
//! - **Full-page rasterization**: repaint the whole document (backgrounds, borders,
//!   wrapped text) from a DOM snapshot onto a page-sized canvas
//! - **Element serialization**: clone an element with its computed presentation
//!   inlined and its image/link references made absolute
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use page_capture::{BrowserSession, CaptureEngine, CaptureOptions, CaptureRequest, LaunchOptions, LogicalRect};
//! use std::sync::Arc;
//!
//! # async fn run() -> page_capture::Result<()> {
//! let session = Arc::new(BrowserSession::launch(LaunchOptions::default())?);
//! session.navigate("https://example.com")?;
//! session.wait_for_navigation()?;
//!
//! // The session is both the capture primitive and the page being captured
//! let engine = CaptureEngine::new(session.clone(), CaptureOptions::default());
//! let artifact = engine
//!     .capture(CaptureRequest::Region { rect: LogicalRect::new(0.0, 0.0, 320.0, 200.0) }, &*session)
//!     .await?;
//! println!("{:?}", artifact.as_bitmap().map(|b| (b.width, b.height)));
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`browser`]: Browser session; the privileged viewport capture and DOM snapshots
//! - [`dom`]: Snapshot of the live page (elements, text, computed style, geometry)
//! - [`capture`]: Capture requests, coordinate scaling, cropping and the engine
//! - [`raster`]: Full-page rasterizer
//! - [`serialize`]: Style-inlining subtree serializer
//! - [`style`]: Presentation property allowlist and extraction
//! - [`canvas`]: Owned pixel surfaces and PNG data URL artifacts
//! - [`error`]: Error types and result aliases

pub mod browser;
pub mod canvas;
pub mod capture;
pub mod dom;
pub mod error;
pub mod raster;
pub mod serialize;
pub mod style;

pub use browser::{BrowserSession, ConnectionOptions, LaunchOptions};
pub use canvas::{BitmapArtifact, RasterCanvas};
pub use capture::{
    CaptureArtifact, CaptureEngine, CaptureOptions, CapturePayload, CaptureRequest, CaptureResponse, LogicalRect,
    PageContext, PhysicalRect, ViewportCapture, ViewportCaptureRequest, ViewportMetrics,
};
pub use dom::{BoundingBox, DomNode, DomTree, ElementNode};
pub use error::{CaptureError, Result};
pub use raster::{PageDimensions, PageRasterizer, RasterOptions};
pub use serialize::{SerializedFragment, SubtreeSerializer};
