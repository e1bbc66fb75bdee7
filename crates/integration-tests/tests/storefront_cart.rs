//! End-to-end cart behavior through the HTTP surface.

use axum::http::StatusCode;
use mystik_canopy_integration_tests::Shopper;

#[tokio::test]
async fn test_health() {
    let mut shopper = Shopper::new();
    let resp = shopper.get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "ok");
}

#[tokio::test]
async fn test_fresh_session_renders_empty_closed_cart() {
    let mut shopper = Shopper::new();
    let resp = shopper.get("/").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Mystik Canopy"));
    assert!(resp.body.contains("Cart (0)"));
    assert!(resp.body.contains("cart-panel closed"));
    assert!(resp.body.contains("Your cart awaits its first treasure"));
    assert!(resp.body.contains("Ethereal Dreams Canopy"));
}

#[tokio::test]
async fn test_htmx_add_returns_open_panel_and_trigger() {
    let mut shopper = Shopper::new();
    let resp = shopper.htmx_post("/cart/add", "product_id=1").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.header("hx-trigger"), Some("cart-updated"));
    assert!(resp.body.contains("cart-panel open"));
    assert!(resp.body.contains("Ethereal Dreams Canopy"));
    assert!(resp.body.contains("$1599.99"));
    assert!(resp.body.contains("Complete Your Journey"));
    assert!(shopper.has_session());
}

#[tokio::test]
async fn test_cart_persists_across_requests() {
    let mut shopper = Shopper::new();
    shopper.htmx_post("/cart/add", "product_id=1").await;
    shopper.htmx_post("/cart/add", "product_id=2").await;

    let panel = shopper.htmx_get("/cart").await;
    assert!(panel.body.contains("$3099.98"));

    let count = shopper.htmx_get("/cart/count").await;
    assert!(count.body.contains("Cart (2)"));

    let page = shopper.get("/").await;
    assert!(page.body.contains("Cart (2)"));
    assert!(page.body.contains("cart-panel open"));
}

#[tokio::test]
async fn test_adding_same_product_twice_keeps_two_lines() {
    let mut shopper = Shopper::new();
    shopper.htmx_post("/cart/add", "product_id=3").await;
    let resp = shopper.htmx_post("/cart/add", "product_id=3").await;

    assert_eq!(resp.body.matches("cart-line-name").count(), 2);
    assert!(resp.body.contains("$2599.98"));
}

#[tokio::test]
async fn test_quantity_never_drops_below_one() {
    let mut shopper = Shopper::new();
    shopper.htmx_post("/cart/add", "product_id=2").await;
    shopper
        .htmx_post("/cart/update", "product_id=2&delta=1")
        .await;
    let resp = shopper
        .htmx_post("/cart/update", "product_id=2&delta=-5")
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(r#"<span class="cart-line-quantity">1</span>"#));
    assert!(resp.body.contains("$1499.99"));
}

#[tokio::test]
async fn test_increment_updates_total() {
    let mut shopper = Shopper::new();
    shopper.htmx_post("/cart/add", "product_id=3").await;
    let resp = shopper
        .htmx_post("/cart/update", "product_id=3&delta=2")
        .await;

    assert!(resp.body.contains(r#"<span class="cart-line-quantity">3</span>"#));
    assert!(resp.body.contains("$3899.97"));
}

#[tokio::test]
async fn test_remove_unknown_id_is_noop() {
    let mut shopper = Shopper::new();
    shopper.htmx_post("/cart/add", "product_id=1").await;
    let resp = shopper.htmx_post("/cart/remove", "product_id=999").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Ethereal Dreams Canopy"));
    assert!(resp.body.contains("$1599.99"));
}

#[tokio::test]
async fn test_remove_last_line_shows_placeholder() {
    let mut shopper = Shopper::new();
    shopper.htmx_post("/cart/add", "product_id=1").await;
    let resp = shopper.htmx_post("/cart/remove", "product_id=1").await;

    assert!(resp.body.contains("Your cart awaits its first treasure"));
    assert!(!resp.body.contains("Complete Your Journey"));
}

#[tokio::test]
async fn test_unknown_product_is_rejected() {
    let mut shopper = Shopper::new();
    let resp = shopper.htmx_post("/cart/add", "product_id=999").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    let panel = shopper.htmx_get("/cart").await;
    assert!(panel.body.contains("Your cart awaits its first treasure"));
}

#[tokio::test]
async fn test_malformed_form_is_rejected() {
    let mut shopper = Shopper::new();
    let resp = shopper.htmx_post("/cart/update", "product_id=1&delta=lots").await;
    assert!(resp.status.is_client_error());
}

#[tokio::test]
async fn test_plain_form_post_redirects_home() {
    let mut shopper = Shopper::new();
    let resp = shopper.post("/cart/add", "product_id=2").await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.header("location"), Some("/"));
    assert!(resp.header("hx-trigger").is_none());

    let page = shopper.get("/").await;
    assert!(page.body.contains("Celestial Haven"));
    assert!(page.body.contains("Cart (1)"));
}

#[tokio::test]
async fn test_open_and_close_panel() {
    let mut shopper = Shopper::new();

    let opened = shopper.htmx_post("/cart/open", "").await;
    assert!(opened.body.contains("cart-panel open"));

    let closed = shopper.htmx_post("/cart/close", "").await;
    assert!(closed.body.contains("cart-panel closed"));

    let page = shopper.get("/").await;
    assert!(page.body.contains("cart-panel closed"));
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let mut alice = Shopper::new();
    alice.htmx_post("/cart/add", "product_id=1").await;

    let mut bob = alice.stranger();
    let page = bob.get("/").await;
    assert!(page.body.contains("Cart (0)"));

    let page = alice.get("/").await;
    assert!(page.body.contains("Cart (1)"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_overlapping_adds_from_one_session_are_all_kept() {
    const TABS: usize = 50;

    let mut shopper = Shopper::new();
    shopper.get("/gallery").await;
    assert!(shopper.has_session());

    let tabs: Vec<_> = (0..TABS)
        .map(|_| {
            let mut tab = shopper.tab();
            tokio::spawn(async move { tab.htmx_post("/cart/add", "product_id=1").await.status })
        })
        .collect();

    for tab in tabs {
        let status = tab.await.expect("add task completes");
        assert!(status.is_success());
    }

    let count = shopper.htmx_get("/cart/count").await;
    assert!(count.body.contains(&format!("Cart ({TABS})")));

    let panel = shopper.htmx_get("/cart").await;
    assert_eq!(panel.body.matches("cart-line-name").count(), TABS);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_overlapping_quantity_changes_are_all_applied() {
    const CLICKS: usize = 20;

    let mut shopper = Shopper::new();
    shopper.htmx_post("/cart/add", "product_id=3").await;

    let clicks: Vec<_> = (0..CLICKS)
        .map(|_| {
            let mut tab = shopper.tab();
            tokio::spawn(async move {
                tab.htmx_post("/cart/update", "product_id=3&delta=1")
                    .await
                    .status
            })
        })
        .collect();

    for click in clicks {
        assert!(click.await.expect("update task completes").is_success());
    }

    let panel = shopper.htmx_get("/cart").await;
    let expected = format!(r#"<span class="cart-line-quantity">{}</span>"#, CLICKS + 1);
    assert!(panel.body.contains(&expected));
}
