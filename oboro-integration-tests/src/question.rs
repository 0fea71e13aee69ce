//! Tests for starting a question session.
#![cfg(test)]

use crate::{
    fixtures::{GO_BLOG, GO_DOC},
    oboro_test, TestingTools,
};
use anyhow::Result;
use oboro_suggest_traits::AnswerHistoryStore;
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

/// The path under test.
const QUESTION: &str = "/api/v1/question";

fn body(user_id: Uuid, value: &str, lang: &str) -> Value {
    json!({"userID": user_id.to_string(), "value": value, "lang": lang})
}

#[actix_rt::test]
async fn first_question_is_about_a_matching_resource() -> Result<()> {
    oboro_test(
        |_| (),
        |TestingTools { test_client, .. }| async move {
            let response = test_client
                .post(QUESTION)
                .json(&body(Uuid::new_v4(), "Go", "ja"))
                .send()
                .await?;
            assert_eq!(response.status(), StatusCode::OK);

            let body: Value = response.json().await?;
            let questions = body.as_array().expect("response is a list");
            assert_eq!(questions.len(), 1);

            let question = &questions[0];
            assert_eq!(question["version"], "v0.0.1");
            assert_eq!(question["questionNumber"], 1);
            assert_eq!(question["url"], GO_DOC);
            assert_eq!(question["title"], "Documentation");
            assert_eq!(question["description"], "The Go documentation");
            assert!(["0000000000000000000000a1", "0000000000000000000000a2"]
                .contains(&question["questionID"].as_str().unwrap()));
            assert!(question["questionJA"].as_str().unwrap().ends_with("について知っていますか?"));
            assert!(question["questionEN"].as_str().unwrap().starts_with("Do you know about"));

            Ok(())
        },
    )
    .await
}

#[actix_rt::test]
async fn unknown_resources_have_empty_descriptions() -> Result<()> {
    oboro_test(
        |_| (),
        |TestingTools { test_client, .. }| async move {
            let response = test_client
                .post(QUESTION)
                .json(&body(Uuid::new_v4(), "Gopher", "en"))
                .send()
                .await?;
            assert_eq!(response.status(), StatusCode::OK);

            let body: Value = response.json().await?;
            assert_eq!(body[0]["url"], GO_BLOG);
            assert_eq!(body[0]["questionID"], "0000000000000000000000a1");
            assert_eq!(body[0]["title"], "");
            assert_eq!(body[0]["description"], "");

            Ok(())
        },
    )
    .await
}

#[actix_rt::test]
async fn asking_creates_the_user() -> Result<()> {
    oboro_test(
        |_| (),
        |TestingTools {
             test_client,
             answer_history,
             ..
         }| async move {
            let user_id = Uuid::new_v4();
            for value in ["Go", "haskell"] {
                test_client
                    .post(QUESTION)
                    .json(&body(user_id, value, "en"))
                    .send()
                    .await?;
            }

            assert_eq!(answer_history.user_count(), 1);
            assert!(answer_history.answers(user_id).await?.is_empty());
            Ok(())
        },
    )
    .await
}

#[actix_rt::test]
async fn unmatched_phrases_get_an_apology() -> Result<()> {
    oboro_test(
        |_| (),
        |TestingTools {
             test_client,
             mut metrics_watcher,
             ..
         }| async move {
            for (phrase, kind) in [
                ("haskell", "no-match"),
                ("search", "no-match"),
                ("Pascal", "empty-keyword-pool"),
            ] {
                let response = test_client
                    .post(QUESTION)
                    .json(&body(Uuid::new_v4(), phrase, "ja"))
                    .send()
                    .await?;
                assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{}", phrase);

                let body: Value = response.json().await?;
                assert_eq!(body[0]["kind"], kind, "{}", phrase);
                assert!(body[0]["message"].as_str().unwrap().starts_with("Sorry"));
            }

            assert_eq!(metrics_watcher.count("suggest.outcome"), 3.0);
            Ok(())
        },
    )
    .await
}

#[actix_rt::test]
async fn suggestions_are_counted() -> Result<()> {
    oboro_test(
        |_| (),
        |TestingTools {
             test_client,
             mut metrics_watcher,
             ..
         }| async move {
            test_client
                .post(QUESTION)
                .json(&body(Uuid::new_v4(), "Go", "en"))
                .send()
                .await?;

            assert_eq!(metrics_watcher.count("suggest.outcome"), 1.0);
            assert!(metrics_watcher.has(|msg| msg.name == "suggest.duration-us"));
            // Two eligible keywords can never fill a sample of five.
            assert_eq!(metrics_watcher.count("suggest.keywords.degraded"), 1.0);
            Ok(())
        },
    )
    .await
}

#[actix_rt::test]
async fn invalid_requests_name_the_field() -> Result<()> {
    oboro_test(
        |_| (),
        |TestingTools { test_client, .. }| async move {
            let cases = [
                (json!({"userID": "1234", "value": "Go", "lang": "ja"}), "'userID' is invalid."),
                (body(Uuid::new_v4(), "  ", "ja"), "'value' is invalid."),
                (body(Uuid::new_v4(), "Go", "de"), "'lang' must be 'ja' or 'en'."),
                (json!({"value": "Go", "lang": "ja"}), "'userID' is invalid."),
            ];

            for (request, message) in cases {
                let response = test_client.post(QUESTION).json(&request).send().await?;
                assert_eq!(response.status(), StatusCode::BAD_REQUEST);

                let body: Value = response.json().await?;
                assert_eq!(body, json!([{ "message": message }]));
            }
            Ok(())
        },
    )
    .await
}

#[actix_rt::test]
async fn malformed_bodies_are_bad_requests() -> Result<()> {
    oboro_test(
        |_| (),
        |TestingTools { test_client, .. }| async move {
            let response = test_client
                .post(QUESTION)
                .header("content-type", "application/json")
                .body("{not json")
                .send()
                .await?;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let body: Value = response.json().await?;
            assert!(body[0]["message"]
                .as_str()
                .unwrap()
                .starts_with("Invalid request body"));
            Ok(())
        },
    )
    .await
}

#[actix_rt::test]
async fn only_post_is_supported() -> Result<()> {
    oboro_test(
        |_| (),
        |TestingTools { test_client, .. }| async move {
            let response = test_client.get(QUESTION).send().await?;
            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

            let body: Value = response.json().await?;
            assert_eq!(
                body,
                json!([{"message": "Sorry, only POST method is supported."}])
            );
            Ok(())
        },
    )
    .await
}
