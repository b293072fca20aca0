//! Scenarios against the real hunter.io API.
//!
//! Ignored by default since they need network access and spend quota. Run
//! with `HUNTER_API_KEY=... cargo test --test live -- --ignored`.

use std::time::Duration;

use hunter_client::{
    Client, DomainSearchQuery, EmailFinderQuery, EmailVerifierQuery, PersonName, Target,
};
use tokio_util::sync::CancellationToken;

fn client() -> Client {
    Client::new().expect("no api key found in the HUNTER_API_KEY environment variable")
}

#[tokio::test]
#[ignore = "requires HUNTER_API_KEY and network access"]
async fn account() {
    let info = client().account().await.unwrap();
    assert!(!info.data.email.is_empty());
}

#[tokio::test]
#[ignore = "requires HUNTER_API_KEY and network access"]
async fn domain_search() {
    let result = client()
        .domain_search(&DomainSearchQuery::domain("stripe.com").unwrap())
        .await
        .unwrap();
    assert!(result.meta.results > 0, "got no results");
}

#[tokio::test]
#[ignore = "requires HUNTER_API_KEY and network access"]
async fn domain_search_with_deadline() {
    let cancel = CancellationToken::new();
    let deadline = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(5)).await;
        deadline.cancel();
    });

    let result = client()
        .domain_search_with_cancel(&DomainSearchQuery::domain("stripe.com").unwrap(), &cancel)
        .await
        .unwrap();
    assert!(result.meta.results > 0, "got no results");
}

#[tokio::test]
#[ignore = "requires HUNTER_API_KEY and network access"]
async fn find_email() {
    let query = EmailFinderQuery::new(
        Target::domain("asana.com").unwrap(),
        PersonName::first_last("Dustin", "Moskovitz").unwrap(),
    );
    let result = client().find_email(&query).await.unwrap();
    assert_eq!(result.data.email.as_deref(), Some("dustin@asana.com"));
}

#[tokio::test]
#[ignore = "requires HUNTER_API_KEY and network access"]
async fn verify_email() {
    let query = EmailVerifierQuery::new("steli@close.io").unwrap();
    let result = client().verify_email(&query).await.unwrap();
    assert_eq!(result.data.email, "steli@close.io");
}
