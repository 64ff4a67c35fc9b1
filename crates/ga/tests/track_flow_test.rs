//! Integration test for the full configure → track → bootstrap → forward flow.

use std::sync::Arc;
use std::time::Duration;

use tagrelay_core::client::{ClientCall, RecordingClient};
use tagrelay_core::types::{CreateParams, Hit, InitState};
use tagrelay_ga::{Analytics, BasePath, ConfigStore, ExcludeRule, GaConfigUpdate, RecordingHost};

fn configured_store() -> ConfigStore {
    let store = ConfigStore::new();
    // Setup-time configuration arrives in pieces; last write wins per field.
    store.apply(GaConfigUpdate {
        tracking_id: Some("UA-0000-0".into()),
        ..Default::default()
    });
    store.apply(GaConfigUpdate {
        tracking_id: Some("UA-9876-1".into()),
        prepend_page_view_url: Some(BasePath::Detect(true)),
        exclude_page_view: Some(vec![
            ExcludeRule::Literal("/healthz".into()),
            ExcludeRule::Pattern {
                pattern: "^/private".into(),
            },
        ]),
        ..Default::default()
    });
    store
}

#[tokio::test(start_paused = true)]
async fn test_tracks_queue_until_the_library_appears() {
    let client = Arc::new(RecordingClient::new());
    let host = Arc::new(RecordingHost::new("http://example.com/shop/#!/start"));

    let analytics = Analytics::new(
        configured_store().snapshot(),
        client.clone(),
        host.clone(),
    )
    .unwrap();
    assert_eq!(analytics.base_path(), "/shop");

    let library_arrives = client.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(250)).await;
        library_arrives.make_available();
    });

    // Issued before the library exists; all wait on the same gate.
    let (pv, ev, soc) = tokio::join!(
        analytics.track_page_view("/cart"),
        analytics.track_event("checkout", "open", None, None),
        analytics.track_social("twitter", "share", "/cart", None),
    );
    pv.unwrap();
    ev.unwrap();
    soc.unwrap();

    assert_eq!(analytics.state(), InitState::Ready);
    assert_eq!(host.injected_count(), 1);

    let calls = client.calls();
    // Tracker creation precedes every forwarded signal.
    assert_eq!(
        calls[0],
        ClientCall::Create {
            tracking_id: "UA-9876-1".into(),
            params: CreateParams::auto(),
        }
    );
    assert!(calls.contains(&ClientCall::SetPage("/shop/cart".into())));
    assert!(calls.contains(&ClientCall::Send(Hit::PageView {
        url: "/shop/cart".into()
    })));
    assert!(calls.contains(&ClientCall::Send(Hit::Event {
        category: "checkout".into(),
        action: "open".into(),
        label: None,
        value: None,
    })));
    assert!(calls.contains(&ClientCall::Send(Hit::Social {
        network: "twitter".into(),
        action: "share".into(),
        url: "/cart".into(),
        value: None,
    })));
}

#[tokio::test(start_paused = true)]
async fn test_excluded_urls_stay_excluded_across_the_whole_flow() {
    let client = Arc::new(RecordingClient::available_now());
    let host = Arc::new(RecordingHost::new("http://example.com/"));

    let analytics = Analytics::new(
        configured_store().snapshot(),
        client.clone(),
        host.clone(),
    )
    .unwrap();

    analytics.track_page_view("/healthz").await.unwrap();
    analytics.track_page_view("/private/profile").await.unwrap();
    // Exclusion short-circuits before the gate: nothing has initialized.
    assert_eq!(analytics.state(), InitState::Uninitialized);
    assert_eq!(client.count(), 0);

    analytics.track_page_view("/cart").await.unwrap();
    analytics.track_page_view("/healthz").await.unwrap();

    let sent: Vec<Hit> = client.sent();
    assert_eq!(sent, vec![Hit::PageView { url: "/cart".into() }]);
}
