//! Tests for reports about searches and favorites.
#![cfg(test)]

use crate::{
    fixtures::{GO_BLOG, GO_DOC},
    oboro_test, TestingTools,
};
use anyhow::Result;
use oboro_suggest_traits::MetadataStore;
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[actix_rt::test]
async fn searches_are_logged() -> Result<()> {
    oboro_test(
        |_| (),
        |TestingTools {
             test_client,
             query_log,
             ..
         }| async move {
            let response = test_client
                .post("/api/v1/user/query")
                .json(&json!({"href": GO_DOC, "searchValue": "goroutine", "isChecked": true}))
                .send()
                .await?;
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(response.json::<Value>().await?, json!([{"version": "v0.0.1"}]));

            let queries = query_log.queries().await;
            assert_eq!(queries.len(), 1);
            assert_eq!(queries[0].href, GO_DOC);
            assert_eq!(queries[0].search_value, "goroutine");
            assert!(queries[0].is_checked);
            Ok(())
        },
    )
    .await
}

#[actix_rt::test]
async fn favorites_update_metadata() -> Result<()> {
    oboro_test(
        |_| (),
        |TestingTools {
             test_client,
             metadata,
             ..
         }| async move {
            for href in [GO_DOC, GO_BLOG] {
                let response = test_client
                    .post("/api/v1/user/favorite")
                    .json(&json!({"href": href, "isChecked": true}))
                    .send()
                    .await?;
                assert_eq!(response.status(), StatusCode::OK);
                assert_eq!(response.json::<Value>().await?, json!([{"version": "v0.0.1"}]));
            }

            let doc = metadata.find_by_resource(GO_DOC).await?.expect("seeded");
            assert!(doc.is_checked);
            assert_eq!(doc.title, "Documentation");

            let blog = metadata.find_by_resource(GO_BLOG).await?.expect("recorded");
            assert!(blog.is_checked);
            assert_eq!(blog.title, "");
            Ok(())
        },
    )
    .await
}

#[actix_rt::test]
async fn reports_without_href_are_bad_requests() -> Result<()> {
    oboro_test(
        |_| (),
        |TestingTools {
             test_client,
             query_log,
             ..
         }| async move {
            let response = test_client
                .post("/api/v1/user/query")
                .json(&json!({"searchValue": "goroutine"}))
                .send()
                .await?;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert!(query_log.queries().await.is_empty());
            Ok(())
        },
    )
    .await
}

#[actix_rt::test]
async fn reports_only_accept_post() -> Result<()> {
    oboro_test(
        |_| (),
        |TestingTools { test_client, .. }| async move {
            for path in ["/api/v1/user/query", "/api/v1/user/favorite"] {
                let response = test_client.get(path).send().await?;
                assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
            }
            Ok(())
        },
    )
    .await
}
