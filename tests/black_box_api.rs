use std::time::Duration;

use inventory_service::client::{console::Console, ClientError, InventoryClient};
use inventory_service::config::ClientConfig;
use inventory_service::{build_router, db, seed, AppState};
use reqwest::StatusCode;

struct TestServer {
    client: InventoryClient,
    handle: tokio::task::JoinHandle<()>,
    _dir: tempfile::TempDir,
}

impl TestServer {
    async fn spawn() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let url = format!("sqlite://{}", dir.path().join("tienda.db").display());
        let pool = db::connect(&url, 8).await.expect("failed to open database");
        db::migrate(&pool).await.expect("failed to migrate");
        seed::seed_if_empty(&pool).await.expect("failed to seed");

        // Same router as prod, bound to an ephemeral port.
        let app = build_router(
            AppState { db: pool, low_stock_threshold: 3 },
            Duration::from_secs(5),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = InventoryClient::new(&ClientConfig {
            base_url: format!("http://{}", addr),
            request_timeout: Duration::from_secs(5),
        })
        .unwrap();

        Self { client, handle, _dir: dir }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn seeded_catalogue_is_listed() {
    let server = TestServer::spawn().await;

    let products = server.client.list_products().await.unwrap();
    assert_eq!(products.len(), 10);
    assert!(products.iter().all(|p| p.stock == 10));
    assert_eq!(products[0].name, "Producto 1");
    assert_eq!(products[0].price_cents, 1100);

    assert!(server.client.list_restock().await.unwrap().is_empty());
}

#[tokio::test]
async fn stock_scenario_over_http() {
    let server = TestServer::spawn().await;
    let client = &server.client;

    assert_eq!(client.add_stock(1, 5).await.unwrap().stock, 15);

    match client.remove_stock(1, 20).await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(message, "No se puede quitar más stock del disponible.");
        }
        other => panic!("expected insufficient stock, got {other:?}"),
    }

    assert_eq!(client.remove_stock(1, 15).await.unwrap().stock, 0);
    assert!(matches!(
        client.remove_stock(1, 1).await,
        Err(ClientError::Api { status, .. }) if status == StatusCode::BAD_REQUEST
    ));

    let restock = client.list_restock().await.unwrap();
    assert_eq!(restock.len(), 1);
    assert_eq!(restock[0].id, 1);
}

#[tokio::test]
async fn unknown_product_is_404() {
    let server = TestServer::spawn().await;

    for result in [
        server.client.add_stock(9999, 1).await,
        server.client.remove_stock(9999, 1).await,
    ] {
        assert!(matches!(
            result,
            Err(ClientError::Api { status, .. }) if status == StatusCode::NOT_FOUND
        ));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_http_removals_keep_stock_non_negative() {
    let server = TestServer::spawn().await;

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..8 {
        let client = server.client.clone();
        tasks.spawn(async move { client.remove_stock(2, 3).await });
    }

    let mut succeeded = 0;
    while let Some(joined) = tasks.join_next().await {
        match joined.unwrap() {
            Ok(product) => {
                assert!(product.stock >= 0);
                succeeded += 1;
            }
            Err(ClientError::Api { status, .. }) => assert_eq!(status, StatusCode::BAD_REQUEST),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    // 10 units, 3 per removal: exactly three can succeed.
    assert_eq!(succeeded, 3);
    let products = server.client.list_products().await.unwrap();
    assert_eq!(products[1].stock, 1);
}

#[tokio::test]
async fn console_session_against_live_server() {
    let server = TestServer::spawn().await;

    let mut out = Vec::new();
    Console::new("3\n1\n5\n4\n1\n99\n4\n1\n5\n2\n1\n0\n".as_bytes(), &mut out)
        .run(&server.client)
        .await
        .unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("✅ Stock agregado correctamente."), "{text}");
    assert!(
        text.contains("❌ Error: No se puede quitar más stock del disponible."),
        "{text}"
    );
    assert!(text.contains("✅ Stock quitado correctamente."), "{text}");
    assert!(text.contains("(sin productos)"), "{text}");
    assert!(text.contains(" 1 | Producto 1           |     $11.00 |    10"), "{text}");
}
