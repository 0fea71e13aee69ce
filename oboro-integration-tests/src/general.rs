//! Tests for behavior shared by the whole service.
#![cfg(test)]

use crate::{oboro_test, TestingTools};
use anyhow::Result;
use pretty_assertions::assert_eq;
use reqwest::{header::HeaderValue, StatusCode};

#[actix_rt::test]
async fn root_of_services_provides_public_docs() -> Result<()> {
    oboro_test(
        |settings| settings.public_documentation = Some("https://example.com/".to_string()),
        |TestingTools { test_client, .. }| async move {
            let response = test_client.get("/").send().await?;

            assert_eq!(response.status(), StatusCode::FOUND);
            assert_eq!(
                response.headers().get("location"),
                Some(&HeaderValue::from_static("https://example.com/"))
            );

            Ok(())
        },
    )
    .await
}

#[actix_rt::test]
async fn root_of_services_has_a_fallback_message() -> Result<()> {
    oboro_test(
        |settings| settings.public_documentation = None,
        |TestingTools { test_client, .. }| async move {
            let response = test_client.get("/").send().await?;

            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(
                response.text().await?,
                "Oboro is a service suggesting questions about what you are searching for."
            );

            Ok(())
        },
    )
    .await
}

#[actix_rt::test]
async fn cross_origin_requests_are_allowed() -> Result<()> {
    oboro_test(
        |_| (),
        |TestingTools { test_client, .. }| async move {
            let response = test_client
                .get("/__heartbeat__")
                .header("Origin", "https://www.example.org")
                .send()
                .await?;

            assert!(response.status().is_success());
            assert!(response
                .headers()
                .contains_key("access-control-allow-origin"));

            Ok(())
        },
    )
    .await
}

#[actix_rt::test]
async fn request_durations_are_recorded() -> Result<()> {
    oboro_test(
        |_| (),
        |TestingTools {
             test_client,
             mut metrics_watcher,
             ..
         }| async move {
            test_client.get("/__heartbeat__").send().await?;

            assert!(metrics_watcher.has(|msg| msg.name == "request.duration"));
            Ok(())
        },
    )
    .await
}
