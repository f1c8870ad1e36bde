//! Capture requests and the engine that turns them into artifacts
//!
//! A request is one of:
//! - `Region`: a logical rectangle of the visible viewport, cut out of a bitmap
//!   obtained from the privileged [`ViewportCapture`] primitive
//! - `FullPage`: the whole document, painted locally by the page rasterizer
//! - `DomElement`: a single element, serialized to a style-inlined HTML fragment
//!
//! The engine keeps no state between captures. Only one request should be in
//! flight per page; the engine neither queues nor rejects concurrent requests.

pub mod crop;
pub mod geometry;

pub use geometry::{LogicalRect, PhysicalRect, ViewportMetrics, resolve_scale, to_source_rect};

use crate::canvas::{BitmapArtifact, decode_bitmap};
use crate::dom::{DomTree, ElementNode, LogicalSize};
use crate::error::{CaptureError, Result};
use crate::raster::{PageDimensions, PageRasterizer, RasterOptions};
use crate::serialize::{SerializedFragment, SubtreeSerializer};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// What the user asked to capture
#[derive(Debug, Clone)]
pub enum CaptureRequest {
    Region { rect: LogicalRect },
    FullPage,
    DomElement { element: ElementNode },
}

impl CaptureRequest {
    fn kind(&self) -> &'static str {
        match self {
            CaptureRequest::Region { .. } => "region",
            CaptureRequest::FullPage => "full-page",
            CaptureRequest::DomElement { .. } => "dom-element",
        }
    }
}

/// Message sent to the privileged capture primitive
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind")]
pub enum ViewportCaptureRequest {
    #[serde(rename = "visible-viewport-capture")]
    VisibleViewport,
}

/// Answer of the privileged capture primitive
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaptureResponse {
    pub ok: bool,

    #[serde(rename = "bitmapDataUrl", default, skip_serializing_if = "Option::is_none")]
    pub bitmap_data_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CaptureResponse {
    pub fn success(bitmap_data_url: impl Into<String>) -> Self {
        Self {
            ok: true,
            bitmap_data_url: Some(bitmap_data_url.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            bitmap_data_url: None,
            error: Some(error.into()),
        }
    }

    /// The bitmap data URL, or the raw error message as a capture failure
    pub fn into_result(self) -> Result<String> {
        match (self.ok, self.bitmap_data_url) {
            (true, Some(url)) => Ok(url),
            (true, None) => Err(CaptureError::CaptureFailed("Response carried no bitmap".to_string())),
            (false, _) => Err(CaptureError::CaptureFailed(
                self.error.unwrap_or_else(|| "Unknown error".to_string()),
            )),
        }
    }
}

/// The trusted host call that screenshots the visible viewport
#[async_trait]
pub trait ViewportCapture: Send + Sync {
    async fn capture_visible_viewport(&self, request: ViewportCaptureRequest) -> CaptureResponse;
}

#[async_trait]
impl<T: ViewportCapture + ?Sized> ViewportCapture for Arc<T> {
    async fn capture_visible_viewport(&self, request: ViewportCaptureRequest) -> CaptureResponse {
        (**self).capture_visible_viewport(request).await
    }
}

/// Read access to the page a capture is taken from
pub trait PageContext {
    /// Current logical size of the visible viewport
    fn logical_viewport(&self) -> Result<LogicalSize>;

    /// Snapshot of the whole document
    fn snapshot_document(&self) -> Result<DomTree>;

    /// Base URL for resolving references in serialized fragments
    fn base_url(&self) -> Option<String> {
        None
    }
}

/// Finished capture output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CaptureArtifact {
    Bitmap {
        #[serde(flatten)]
        bitmap: BitmapArtifact,
        /// Page size for full-page captures
        #[serde(default, skip_serializing_if = "Option::is_none")]
        page: Option<PageDimensions>,
    },
    Markup {
        #[serde(flatten)]
        fragment: SerializedFragment,
    },
}

impl CaptureArtifact {
    pub fn as_bitmap(&self) -> Option<&BitmapArtifact> {
        match self {
            CaptureArtifact::Bitmap { bitmap, .. } => Some(bitmap),
            CaptureArtifact::Markup { .. } => None,
        }
    }

    pub fn as_markup(&self) -> Option<&SerializedFragment> {
        match self {
            CaptureArtifact::Markup { fragment } => Some(fragment),
            CaptureArtifact::Bitmap { .. } => None,
        }
    }
}

/// An artifact plus the free-text metadata handed to the upload collaborator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CapturePayload {
    pub artifact: CaptureArtifact,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_url: Option<String>,
}

impl CapturePayload {
    pub fn new(artifact: CaptureArtifact) -> Self {
        Self {
            artifact,
            description: String::new(),
            tags: Vec::new(),
            page_url: None,
        }
    }

    /// Builder method: set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder method: add a tag
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Builder method: set the page URL
    pub fn page_url(mut self, url: impl Into<String>) -> Self {
        self.page_url = Some(url.into());
        self
    }

    /// Convert to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| CaptureError::EncodeFailed(e.to_string()))
    }
}

/// Options for the capture engine
#[derive(Debug, Clone, Default)]
pub struct CaptureOptions {
    /// Upper bound on the privileged capture round trip; unbounded when `None`
    pub capture_timeout: Option<Duration>,

    /// Options for full-page rasterization
    pub raster: RasterOptions,
}

impl CaptureOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: bound the capture round trip
    pub fn capture_timeout(mut self, timeout: Duration) -> Self {
        self.capture_timeout = Some(timeout);
        self
    }

    /// Builder method: set rasterizer options
    pub fn raster(mut self, raster: RasterOptions) -> Self {
        self.raster = raster;
        self
    }
}

/// Runs capture requests against a page and a capture primitive
pub struct CaptureEngine<C> {
    primitive: C,
    rasterizer: PageRasterizer,
    options: CaptureOptions,
}

impl<C: ViewportCapture> CaptureEngine<C> {
    /// Create an engine; loads the rasterizer font up front
    pub fn new(primitive: C, options: CaptureOptions) -> Self {
        let rasterizer = PageRasterizer::new(options.raster.clone());
        Self {
            primitive,
            rasterizer,
            options,
        }
    }

    /// Create an engine with a prepared rasterizer
    pub fn with_rasterizer(primitive: C, rasterizer: PageRasterizer, options: CaptureOptions) -> Self {
        Self {
            primitive,
            rasterizer,
            options,
        }
    }

    pub fn primitive(&self) -> &C {
        &self.primitive
    }

    /// Consume `request` and produce its artifact.
    ///
    /// Failures abort the capture without a partial artifact and are not retried.
    pub async fn capture<P>(&self, request: CaptureRequest, page: &P) -> Result<CaptureArtifact>
    where
        P: PageContext + ?Sized,
    {
        log::debug!("Starting {} capture", request.kind());

        let artifact = match request {
            CaptureRequest::Region { rect } => self.capture_region(rect, page).await?,
            CaptureRequest::FullPage => self.capture_full_page(page)?,
            CaptureRequest::DomElement { element } => {
                let serializer = SubtreeSerializer::new().with_base_url_str(page.base_url().as_deref());
                CaptureArtifact::Markup {
                    fragment: serializer.serialize(&element)?,
                }
            }
        };

        Ok(artifact)
    }

    async fn capture_region<P>(&self, rect: LogicalRect, page: &P) -> Result<CaptureArtifact>
    where
        P: PageContext + ?Sized,
    {
        let logical = page.logical_viewport()?;
        let data_url = self.request_viewport_bitmap().await?;
        let bitmap = decode_bitmap(&data_url).await?;

        let viewport = ViewportMetrics::new(logical.width, logical.height, bitmap.width(), bitmap.height());
        let scale = resolve_scale(&viewport)?;
        let source = to_source_rect(&rect, scale);
        log::info!(
            "Cropping region {:?} at scale {} -> {}x{}+{}+{}",
            rect,
            scale,
            source.width,
            source.height,
            source.x,
            source.y
        );

        let canvas = crop::crop_surface(&bitmap, source);
        Ok(CaptureArtifact::Bitmap {
            bitmap: canvas.into_artifact()?,
            page: None,
        })
    }

    fn capture_full_page<P>(&self, page: &P) -> Result<CaptureArtifact>
    where
        P: PageContext + ?Sized,
    {
        let document = page.snapshot_document()?;
        let (canvas, dimensions) = self.rasterizer.rasterize_full_page(&document);
        Ok(CaptureArtifact::Bitmap {
            bitmap: canvas.into_artifact()?,
            page: Some(dimensions),
        })
    }

    /// One round trip to the capture primitive, bounded by the configured timeout
    async fn request_viewport_bitmap(&self) -> Result<String> {
        let round_trip = self
            .primitive
            .capture_visible_viewport(ViewportCaptureRequest::VisibleViewport);

        let response = match self.options.capture_timeout {
            Some(limit) => tokio::time::timeout(limit, round_trip)
                .await
                .map_err(|_| CaptureError::Timeout(limit.as_millis() as u64))?,
            None => round_trip.await,
        };

        response.into_result().inspect_err(|e| log::warn!("{}", e))
    }
}
