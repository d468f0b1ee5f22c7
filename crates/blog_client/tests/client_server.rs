use blog_client::{BlogClient, ClientError};
use blog_core::{open_store_in_memory, Code};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct TestServer {
    client: BlogClient,
    stop: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

async fn start_server() -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let store = Arc::new(open_store_in_memory().unwrap());
    let (stop, stopped) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        blog_server::serve(listener, store, "blog", async {
            let _ = stopped.await;
        })
        .await
        .unwrap();
    });

    TestServer {
        client: BlogClient::new(format!("http://{addr}/")),
        stop,
        handle,
    }
}

#[tokio::test]
async fn create_then_read_over_the_wire() {
    let server = start_server().await;

    let created = server
        .client
        .create_blog("Stephane", "My First Blog", "Content of the first blog")
        .await
        .unwrap();
    assert_eq!(created.id.len(), 24);

    let read = server.client.read_blog(created.id.clone()).await.unwrap();
    assert_eq!(read, created);

    server.stop.send(()).unwrap();
    server.handle.await.unwrap();
}

#[tokio::test]
async fn errors_arrive_classified() {
    let server = start_server().await;

    let err = server.client.read_blog("not-an-id").await.unwrap_err();
    assert_eq!(err.code(), Some(Code::InvalidArgument));

    let err = server
        .client
        .read_blog("ffffffffffffffffffffffff")
        .await
        .unwrap_err();
    assert!(matches!(&err, ClientError::Status(status) if status.code == Code::NotFound));

    server.stop.send(()).unwrap();
    server.handle.await.unwrap();
}

#[tokio::test]
async fn concurrent_identical_creates_are_distinct() {
    let server = start_server().await;

    let (first, second) = tokio::join!(
        server.client.create_blog("a", "same", "same"),
        server.client.create_blog("a", "same", "same"),
    );
    let (first, second) = (first.unwrap(), second.unwrap());
    assert_ne!(first.id, second.id);
    assert_eq!(server.client.read_blog(first.id.clone()).await.unwrap(), first);
    assert_eq!(server.client.read_blog(second.id.clone()).await.unwrap(), second);

    server.stop.send(()).unwrap();
    server.handle.await.unwrap();
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = BlogClient::new(format!("http://{addr}"));
    let err = client.read_blog("ffffffffffffffffffffffff").await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert_eq!(err.code(), None);
}
