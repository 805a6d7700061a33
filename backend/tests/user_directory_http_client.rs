//! The HTTP directory client against a live user-directory app.

use std::net::TcpListener;
use std::time::Duration;

use actix_web::{HttpServer, web};
use carbon_backend::domain::ports::{UserDirectory, UserDirectoryError};
use carbon_backend::domain::{Registration, UserId};
use carbon_backend::inbound::http::health::HealthState;
use carbon_backend::inbound::http::state::DirectoryState;
use carbon_backend::outbound::user_directory::UserDirectoryHttpClient;
use carbon_backend::server::{build_directory_app, build_directory_state};
use rstest::rstest;
use url::Url;

async fn spawn_directory() -> (Url, DirectoryState) {
    let state = build_directory_state(None);
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    let health = web::Data::new(HealthState::new());
    let data = web::Data::new(state.clone());
    let server = HttpServer::new(move || build_directory_app(health.clone(), data.clone()))
        .workers(1)
        .listen(listener)
        .expect("listen")
        .run();
    actix_rt::spawn(server);
    let url = Url::parse(&format!("http://{addr}/")).expect("valid url");
    (url, state)
}

async fn register(state: &DirectoryState, email: &str) -> UserId {
    let registration =
        Registration::try_from_parts("Asha", email, "Pune", "open sesame", "open sesame")
            .expect("valid registration");
    state
        .commands
        .register(registration)
        .await
        .expect("registration succeeds")
        .id
}

fn client(url: Url) -> UserDirectoryHttpClient {
    UserDirectoryHttpClient::new(url, Duration::from_secs(5)).expect("client builds")
}

#[rstest]
#[actix_web::test]
async fn finds_known_users_and_misses_unknown_ones() {
    let (url, state) = spawn_directory().await;
    let user_id = register(&state, "asha@example.com").await;
    let client = client(url);

    let found = client
        .find_user(user_id)
        .await
        .expect("lookup succeeds")
        .expect("user exists");
    assert_eq!(found.id, user_id);
    assert_eq!(found.city, "Pune");

    let missing = client
        .find_user(UserId::new(404).expect("valid id"))
        .await
        .expect("lookup succeeds");
    assert!(missing.is_none());
}

#[rstest]
#[actix_web::test]
async fn credits_are_applied_remotely() {
    let (url, state) = spawn_directory().await;
    let user_id = register(&state, "asha@example.com").await;
    let client = client(url);

    client.credit_total(user_id, 5.0).await.expect("credit");
    let record = client.credit_total(user_id, 7.0).await.expect("credit");
    assert!((record.total_carbon_footprint - 12.0).abs() < 1e-9);

    let listed = client.list_users().await.expect("list");
    assert_eq!(listed.len(), 1);
}

#[rstest]
#[actix_web::test]
async fn crediting_an_unknown_user_is_not_found() {
    let (url, _state) = spawn_directory().await;
    let client = client(url);

    let err = client
        .credit_total(UserId::new(31).expect("valid id"), 1.0)
        .await
        .expect_err("unknown user");
    assert_eq!(err, UserDirectoryError::not_found(31_i64));
}

#[rstest]
#[actix_web::test]
async fn unreachable_directory_is_unavailable() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    let client = client(Url::parse(&format!("http://{addr}/")).expect("valid url"));

    let err = client.list_users().await.expect_err("nothing listening");
    assert!(matches!(err, UserDirectoryError::Unavailable { .. }));
}
