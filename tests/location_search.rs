mod common;

use common::{search_form, Harness, HERE, LOADING};
use futures_util::future::join3;
use place_actions::app::{SearchKind, SearchPhase, SearchRequest, LOCATION_DISABLED_ALERT};
use place_actions::dom::{Document, Element};

// =========================================================================
// Success paths
// =========================================================================

#[tokio::test]
async fn nearby_search_clears_loading_before_navigating() {
    let harness = Harness::new();
    let (nearby, _) = search_form(&harness.doc);
    harness.watch(&nearby);
    harness.app().bind_all();

    harness.doc.click(&nearby).await;

    assert_eq!(
        harness.entries(),
        [
            "geolocation loading=true",
            "redirect /places/nearby?location=51.5,-0.12&radius=1500&place_type=restaurant loading=false",
        ]
    );
    assert!(!nearby.has_class(LOADING));
}

#[tokio::test]
async fn click_on_icon_inside_search_button_triggers_search() {
    let harness = Harness::new();
    let (nearby, _) = search_form(&harness.doc);
    let icon = nearby.append("span");
    harness.app().bind_all();

    let dispatch = harness.doc.click(&icon).await;

    assert!(dispatch.default_prevented);
    assert_eq!(harness.geolocation.as_ref().unwrap().calls.get(), 1);
}

#[tokio::test]
async fn text_search_encodes_the_query() {
    let harness = Harness::new();
    let (_, text) = search_form(&harness.doc);
    let query = harness.doc.element_by_id("query").unwrap();
    harness.app().bind_all();
    assert!(text.is_disabled());

    harness.doc.type_text(&query, "tacos & beer").await;
    assert!(!text.is_disabled());
    harness.doc.click(&text).await;

    assert_eq!(
        harness.entries_of("redirect "),
        ["/places/search?location=51.5,-0.12&radius=1500&query=tacos%20%26%20beer loading=false"]
    );
}

#[tokio::test]
async fn blank_query_keeps_text_search_disabled() {
    let harness = Harness::new();
    let (_, text) = search_form(&harness.doc);
    let query = harness.doc.element_by_id("query").unwrap();
    harness.app().bind_all();

    harness.doc.type_text(&query, "   ").await;
    harness.doc.click(&text).await;

    assert!(text.is_disabled());
    assert_eq!(harness.geolocation.as_ref().unwrap().calls.get(), 0);
}

#[tokio::test]
async fn next_page_carries_cursor_and_kind() {
    let harness = Harness::new();
    search_form(&harness.doc);
    harness.doc.element_by_id("query").unwrap().set_value("ramen");
    let next = harness
        .doc
        .create_element("button", None)
        .with_id("search-next-page")
        .with_data("pagecursor", "CmRa/Q==")
        .with_data("searchkind", "text");
    let report = harness.app().bind_all();
    assert_eq!(report.search_controls, 3);

    harness.doc.click(&next).await;

    assert_eq!(
        harness.entries_of("redirect "),
        ["/places/search?location=51.5,-0.12&radius=1500&query=ramen&page_cursor=CmRa%2FQ%3D%3D loading=false"]
    );
}

// =========================================================================
// Failure paths
// =========================================================================

#[tokio::test]
async fn permission_denied_alerts_without_navigation() {
    let harness = Harness::new();
    let (nearby, _) = search_form(&harness.doc);
    harness.watch(&nearby);
    harness.geolocation.as_ref().unwrap().answer(Err(1));
    harness.app().bind_all();

    harness.doc.click(&nearby).await;

    assert_eq!(
        harness.entries(),
        [
            "geolocation loading=true",
            "error Failed to get browser location: permission denied loading=false",
        ]
    );
    assert!(!nearby.has_class(LOADING));
}

#[tokio::test]
async fn every_error_code_has_its_alert() {
    let cases = [
        (2, "Failed to get browser location: position unavailable, try again"),
        (3, "Failed to get browser location: timed out, try again"),
        (7, "Failed to get browser location (error code 7)"),
    ];
    for (code, alert) in cases {
        let harness = Harness::new();
        let (nearby, _) = search_form(&harness.doc);
        harness.watch(&nearby);
        harness.geolocation.as_ref().unwrap().answer(Err(code));
        harness.app().bind_all();

        harness.doc.click(&nearby).await;

        assert_eq!(
            harness.entries(),
            ["geolocation loading=true".to_string(), format!("error {alert} loading=false")]
        );
    }
}

#[tokio::test]
async fn repeated_triggers_each_request_a_position() {
    let harness = Harness::new();
    let (nearby, _) = search_form(&harness.doc);
    let app = harness.app();
    app.bind_all();

    harness.doc.click(&nearby).await;
    harness.doc.click(&nearby).await;

    assert_eq!(harness.geolocation.as_ref().unwrap().calls.get(), 2);
    assert_eq!(harness.entries_of("redirect ").len(), 2);
    assert_eq!(app.search().phase(), SearchPhase::Idle);
}

#[tokio::test]
async fn overlapping_searches_finish_independently() {
    let harness = Harness::new();
    let (nearby, text) = search_form(&harness.doc);
    let query = harness.doc.element_by_id("query").unwrap();
    let geolocation = harness.geolocation.clone().unwrap();
    geolocation.hold();
    let app = harness.app();
    app.bind_all();
    harness.doc.type_text(&query, "ramen").await;

    let observe = async {
        assert_eq!(geolocation.pending(), 2);
        assert_eq!(app.search().phase(), SearchPhase::Acquiring);
        assert!(nearby.has_class(LOADING));
        assert!(text.has_class(LOADING));

        geolocation.release(Ok(HERE));
        while nearby.has_class(LOADING) {
            tokio::task::yield_now().await;
        }
        assert!(text.has_class(LOADING));
        assert_eq!(app.search().phase(), SearchPhase::Acquiring);
        assert_eq!(harness.entries_of("redirect ").len(), 1);

        geolocation.release(Err(3));
    };
    join3(harness.doc.click(&nearby), harness.doc.click(&text), observe).await;

    assert!(!text.has_class(LOADING));
    assert_eq!(app.search().phase(), SearchPhase::Idle);
    assert_eq!(
        harness.entries_of("error "),
        ["Failed to get browser location: timed out, try again loading=false"]
    );
}

// =========================================================================
// No provider
// =========================================================================

#[tokio::test]
async fn missing_provider_disables_every_control() {
    let harness = Harness::without_geolocation();
    let (nearby, text) = search_form(&harness.doc);
    let report = harness.app().bind_all();

    assert_eq!(report.search_controls, 0);
    for control in [&nearby, &text] {
        assert!(control.is_disabled());
        assert_eq!(control.text(), "Location search disabled");
    }

    let dispatch = harness.doc.click(&nearby).await;
    assert_eq!(dispatch.listeners_run, 0);
    assert!(harness.entries().is_empty());
}

#[tokio::test]
async fn programmatic_search_without_provider_alerts() {
    let harness = Harness::without_geolocation();
    let (nearby, _) = search_form(&harness.doc);
    let app = harness.app();

    app.search()
        .search(&nearby, SearchRequest::first_page(SearchKind::Nearby))
        .await;

    assert_eq!(
        harness.entries_of("error "),
        [format!("{LOCATION_DISABLED_ALERT} loading=false")]
    );
    assert!(!nearby.has_class(LOADING));
}

#[test]
fn destination_reads_inputs_at_call_time() {
    let harness = Harness::new();
    search_form(&harness.doc);
    let app = harness.app();
    harness.doc.element_by_id("search-radius").unwrap().set_value("500");

    let url = app
        .search()
        .destination(&SearchRequest::first_page(SearchKind::Nearby), HERE);

    assert_eq!(url, "/places/nearby?location=51.5,-0.12&radius=500&place_type=restaurant");
}
