use page_capture::{BrowserSession, CaptureEngine, CaptureOptions, CaptureRequest, LaunchOptions, LogicalRect};
use std::sync::Arc;

const PAGE: &str = "data:text/html,<html><body style='margin:0'><div id='card' style='background:rgb(255,0,0);width:120px;height:80px'><img src='logo.png'><a href='next'>Next</a></div><div style='display:none'>hidden</div></body></html>";

#[test]
#[ignore] // Requires Chrome to be installed
fn test_dom_snapshot() {
    let session = BrowserSession::launch(LaunchOptions::new().headless(true)).expect("Failed to launch browser");
    session.navigate(PAGE).expect("Failed to navigate");
    session.wait_for_navigation().expect("Navigation did not finish");

    let dom = session.extract_dom().expect("Failed to extract DOM");

    assert_eq!(dom.root.tag_name, "body");
    assert!(dom.count_elements() >= 4);
    assert!(!dom.root_metrics.is_empty());

    let card = dom.find_by_id("card").expect("card not in snapshot");
    assert_eq!(card.computed_style.get("backgroundColor"), Some("rgb(255, 0, 0)"));
    let bounds = card.bounding_box.expect("card has no box");
    assert_eq!((bounds.width, bounds.height), (120.0, 80.0));

    let json = dom.to_json().expect("Failed to convert to JSON");
    assert!(json.contains("card"));
}

#[test]
#[ignore]
fn test_element_snapshot_resolves_references() {
    let session = BrowserSession::launch(LaunchOptions::new().headless(true)).expect("Failed to launch browser");
    session.navigate(PAGE).expect("Failed to navigate");
    session.wait_for_navigation().expect("Navigation did not finish");

    let card = session.extract_element("#card").expect("Failed to extract element");
    assert_eq!(card.element_children().count(), 2);

    let img = card.element_children().next().expect("img missing");
    assert!(img.resolved_src.is_some());
}

#[tokio::test]
#[ignore]
async fn test_capture_all_kinds_against_chrome() {
    let session = Arc::new(
        BrowserSession::launch(LaunchOptions::new().headless(true).window_size(800, 600))
            .expect("Failed to launch browser"),
    );
    session.navigate(PAGE).expect("Failed to navigate");
    session.wait_for_navigation().expect("Navigation did not finish");

    let engine = CaptureEngine::new(session.clone(), CaptureOptions::default());

    let region = engine
        .capture(
            CaptureRequest::Region {
                rect: LogicalRect::new(0.0, 0.0, 60.0, 40.0),
            },
            &*session,
        )
        .await
        .expect("Region capture failed");
    let bitmap = region.as_bitmap().expect("expected a bitmap");
    assert!(bitmap.width >= 60 && bitmap.height >= 40);

    let full = engine
        .capture(CaptureRequest::FullPage, &*session)
        .await
        .expect("Full-page capture failed");
    assert!(full.as_bitmap().is_some());

    let card = session.extract_element("#card").expect("Failed to extract element");
    let markup = engine
        .capture(CaptureRequest::DomElement { element: card }, &*session)
        .await
        .expect("Element capture failed");
    let fragment = markup.as_markup().expect("expected markup");
    assert!(fragment.content.contains("background-color: rgb(255, 0, 0);"));
}
