// this_file: crates/labelhost/tests/host.rs

use std::sync::Arc;

use futures::channel::mpsc::UnboundedReceiver;
use futures::future::BoxFuture;
use labelhost::{serve, Host, HostConfig, Inbound, Outbound, Seams};
use labelhost_core::{
    error::Result,
    messages::{PointerEvent, RequestId},
    AssetStore, Cursor, FilePicker, FontFetcher, FontLoadError, PickedFile,
};

struct OfflineFetcher;

impl FontFetcher for OfflineFetcher {
    fn fetch<'a>(&'a self, source: &'a str) -> BoxFuture<'a, Result<Vec<u8>>> {
        Box::pin(async move {
            Err(FontLoadError::FetchFailed {
                source_url: source.to_string(),
                reason: "offline".into(),
            }
            .into())
        })
    }
}

struct CancellingPicker;

impl FilePicker for CancellingPicker {
    fn pick<'a>(&'a self, _accept_types: &'a [String]) -> BoxFuture<'a, Result<Option<PickedFile>>> {
        Box::pin(async { Ok(None) })
    }
}

struct AcceptingStore;

impl AssetStore for AcceptingStore {
    fn put<'a>(
        &'a self,
        _path: &'a str,
        _content_type: &'a str,
        _body: Vec<u8>,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async { Ok(()) })
    }
}

fn offline_host() -> (Host, UnboundedReceiver<Outbound>) {
    let config = HostConfig {
        preload_fonts: false,
        ..HostConfig::default()
    };
    let seams = Seams {
        fetcher: Arc::new(OfflineFetcher),
        picker: Arc::new(CancellingPicker),
        store: Arc::new(AcceptingStore),
    };
    Host::with_seams(config, seams)
}

async fn run_lines(lines: &[&str]) -> Vec<serde_json::Value> {
    run_bytes(lines.join("\n").as_bytes()).await
}

async fn run_bytes(input: &[u8]) -> Vec<serde_json::Value> {
    let (host, rx) = offline_host();
    let mut output = Vec::new();
    serve(host, rx, input, &mut output)
        .await
        .expect("serve");
    String::from_utf8(output)
        .expect("utf8")
        .lines()
        .map(|l| serde_json::from_str(l).expect("json line"))
        .collect()
}

fn by_request_id<'a>(responses: &'a [serde_json::Value], id: &str) -> &'a serde_json::Value {
    responses
        .iter()
        .find(|r| r["requestId"] == id)
        .unwrap_or_else(|| panic!("no response for {}", id))
}

#[tokio::test]
async fn test_every_request_is_answered_once_with_its_id() {
    let responses = run_lines(&[
        r#"{"type":"measure-text","requestId":"m1","text":"Soup","fontFamily":"Atkinson Hyperlegible","fontWeight":400,"maxFontSize":20,"minFontSize":8,"maxWidth":100}"#,
        r#"{"type":"svg-to-png","sourceElementId":"missing","requestId":"r1","width":10,"height":10,"rotate":false}"#,
        r#"{"type":"select-file","requestId":"f1","maxSizeKb":4000,"acceptTypes":["image/png"]}"#,
    ])
    .await;

    assert_eq!(responses.len(), 3);

    let measured = by_request_id(&responses, "m1");
    assert_eq!(measured["type"], "measure-result");
    assert_eq!(measured["fittedFontSize"], 20);
    assert_eq!(measured["lines"], serde_json::json!(["Soup"]));

    let png = by_request_id(&responses, "r1");
    assert_eq!(png["type"], "png-result");
    assert_eq!(png["dataUrl"], serde_json::Value::Null);
    assert_eq!(png["error"], "element not found: missing");

    let file = by_request_id(&responses, "f1");
    assert_eq!(file["type"], "file-result");
    assert_eq!(file["dataUrl"], serde_json::Value::Null);
    assert_eq!(file["error"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_malformed_lines_are_skipped() {
    let responses = run_lines(&[
        "not json at all",
        r#"{"type":"no-such-message","requestId":1}"#,
        "",
        r#"{"type":"measure-text","requestId":2,"text":"Tea","fontFamily":"F","fontWeight":"bold","maxFontSize":12,"minFontSize":6,"maxWidth":500}"#,
    ])
    .await;

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["requestId"], 2);
    assert_eq!(responses[0]["fittedFontSize"], 12);
}

#[tokio::test]
async fn test_font_failure_reaches_png_result() {
    let responses = run_lines(&[
        r#"{"type":"mount-svg","elementId":"label-svg","svg":"<svg viewBox=\"0 0 10 10\"/>"}"#,
        r#"{"type":"svg-to-png","svgId":"label-svg","requestId":9,"width":10,"height":10}"#,
    ])
    .await;

    assert_eq!(responses.len(), 1);
    let error = responses[0]["error"].as_str().unwrap();
    assert!(error.starts_with("Font fetch failed for https://"), "{}", error);
}

#[tokio::test]
async fn test_line_that_is_not_utf8_is_skipped_and_serving_continues() {
    let mut input = Vec::new();
    input.extend_from_slice(br#"{"type":"select-file","requestId":"before","maxSizeKb":1}"#);
    input.push(b'\n');
    input.extend_from_slice(&[0xff, 0xfe, b'\n']);
    input.extend_from_slice(br#"{"type":"select-file","requestId":"after","maxSizeKb":1}"#);
    input.push(b'\n');

    let responses = run_bytes(&input).await;

    assert_eq!(responses.len(), 2);
    assert_eq!(by_request_id(&responses, "before")["type"], "file-result");
    assert_eq!(by_request_id(&responses, "after")["type"], "file-result");
}

#[tokio::test]
async fn test_unreadable_request_with_id_gets_error_of_its_kind() {
    let responses = run_lines(&[
        r#"{"type":"svg-to-png","requestId":"p5","sourceElementId":"x","width":696.5,"height":271}"#,
        r#"{"type":"measure-text","requestId":"m6","fontFamily":"F","maxFontSize":12,"minFontSize":6,"maxWidth":50}"#,
        r#"{"type":"select-file","requestId":"f7","maxSizeKb":-1}"#,
    ])
    .await;

    assert_eq!(responses.len(), 3);

    let png = by_request_id(&responses, "p5");
    assert_eq!(png["type"], "png-result");
    assert_eq!(png["dataUrl"], serde_json::Value::Null);
    assert!(
        png["error"].as_str().unwrap().starts_with("malformed request: "),
        "{}",
        png
    );

    let measured = by_request_id(&responses, "m6");
    assert_eq!(measured["type"], "measure-result");
    assert_eq!(measured["lines"], serde_json::json!([]));
    assert!(measured["error"].as_str().unwrap().contains("text"), "{}", measured);

    let file = by_request_id(&responses, "f7");
    assert_eq!(file["type"], "file-result");
    assert!(file["error"].is_string());
}

async fn until_tracked(host: &Host, element_id: &str) {
    for _ in 0..16 {
        if host.context().gestures.lock().get(element_id).is_some() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("'{}' never got a tracker", element_id);
}

#[tokio::test]
async fn test_gesture_flow_emits_update_at_gesture_end() {
    let (host, mut rx) = offline_host();
    host.dispatch(Inbound::MountSvg {
        element_id: "preview".into(),
        svg: "<svg/>".into(),
    });
    host.dispatch(Inbound::InitPinchZoom {
        element_id: "preview".into(),
        initial_zoom: 1.0,
    });
    until_tracked(&host, "preview").await;
    assert_eq!(
        host.context().documents.lock().get("preview").unwrap().cursor,
        Some(Cursor::Grab)
    );

    let pointer = |event| Inbound::Pointer {
        element_id: "preview".into(),
        event,
    };
    host.dispatch(pointer(PointerEvent::MouseDown {
        button: 0,
        x: 0.0,
        y: 0.0,
    }));
    host.dispatch(pointer(PointerEvent::MouseMove { x: 8.0, y: 4.0 }));
    assert!(rx.try_next().is_err(), "moves do not emit");

    host.dispatch(pointer(PointerEvent::MouseUp));
    match rx.try_next() {
        Ok(Some(Outbound::ZoomUpdate(update))) => {
            assert_eq!(update.element_id, "preview");
            assert_eq!((update.zoom, update.pan_x, update.pan_y), (1.0, 8.0, 4.0));
        },
        other => panic!("expected zoom-update, got {:?}", other),
    }

    host.dispatch(Inbound::SetPinchZoom {
        element_id: "preview".into(),
        zoom: 2.0,
        pan_x: 0.0,
        pan_y: 0.0,
    });
    assert_eq!(
        host.context()
            .documents
            .lock()
            .get("preview")
            .unwrap()
            .transform
            .as_deref(),
        Some("scale(2) translate(0px, 0px)")
    );
}

#[tokio::test]
async fn test_init_for_unmounted_element_registers_nothing() {
    let (host, _rx) = offline_host();
    host.dispatch(Inbound::InitPinchZoom {
        element_id: "ghost".into(),
        initial_zoom: 1.0,
    });
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
    assert!(host.context().gestures.lock().is_empty());
}

#[tokio::test]
async fn test_string_and_numeric_request_ids_echo_verbatim() {
    let responses = run_lines(&[
        r#"{"type":"select-file","requestId":"abc","maxSizeKb":1}"#,
        r#"{"type":"select-file","requestId":42,"maxSizeKb":1}"#,
    ])
    .await;
    let ids: Vec<RequestId> = responses
        .iter()
        .map(|r| serde_json::from_value(r["requestId"].clone()).unwrap())
        .collect();
    assert!(ids.contains(&RequestId::from("abc")));
    assert!(ids.contains(&RequestId::from(42)));
}
