//! End-to-end tests over a real listener.

use std::net::SocketAddr;

use front_door::http::HttpServer;
use front_door::lifecycle::Shutdown;
use reqwest::StatusCode;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

mod common;

async fn start(base_path: &str, assets: &std::path::Path) -> (SocketAddr, Shutdown, JoinHandle<()>) {
    let mut config = common::config(base_path, assets);
    config
        .server
        .custom_response_headers
        .insert("x-frame-options".into(), "DENY".into());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap().with_routes(common::app_routes());
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move {
        server.run(listener, server_shutdown).await.unwrap();
    });

    (addr, shutdown, handle)
}

#[tokio::test]
async fn test_redirect_chain_over_tcp() {
    let assets = common::asset_dir();
    let (addr, shutdown, handle) = start("", assets.path()).await;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let res = client
        .get(format!("http://{addr}/ui/logo.png/"))
        .send()
        .await
        .expect("front door unreachable");

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.url().path(), "/ui/logo.png");
    assert_eq!(res.headers()["kbn-name"], "kibana");
    assert_eq!(res.headers()["x-frame-options"], "DENY");
    assert_eq!(res.text().await.unwrap(), "png-bytes");

    shutdown.trigger();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_root_redirect_over_tcp() {
    let assets = common::asset_dir();
    let (addr, shutdown, handle) = start("/kbn", assets.path()).await;

    let client = reqwest::Client::builder()
        .no_proxy()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    let res = client.get(format!("http://{addr}/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()["location"], "/kbn/app/home");
    assert_eq!(res.headers()["kbn-name"], "kibana");

    let res = client
        .get(format!("http://{addr}/kbn/app/home"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "home");

    shutdown.trigger();
    handle.await.unwrap();
}
