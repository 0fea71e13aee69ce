//! Tests for answering a question and moving on to the next one.
#![cfg(test)]

use crate::{fixtures::GO_DOC, oboro_test, TestingTools};
use anyhow::Result;
use oboro_suggest_traits::{AnswerHistoryStore, Lang};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

/// The path under test.
const ANSWER: &str = "/api/v1/question-answer";

fn answer(user_id: Uuid, number: i64, choice: i64) -> Value {
    json!({
        "questionID": "0000000000000000000000a1",
        "userID": user_id.to_string(),
        "questionNumber": number,
        "questionAnswerID": choice,
        "questionValue": "Go",
        "lang": "en",
        "version": "v0.0.1"
    })
}

#[actix_rt::test]
async fn answers_are_recorded_and_followed_by_a_question() -> Result<()> {
    oboro_test(
        |_| (),
        |TestingTools {
             test_client,
             answer_history,
             mut metrics_watcher,
             ..
         }| async move {
            let user_id = Uuid::new_v4();
            let response = test_client
                .post(ANSWER)
                .json(&answer(user_id, 3, 5))
                .send()
                .await?;
            assert_eq!(response.status(), StatusCode::OK);

            let body: Value = response.json().await?;
            assert_eq!(body[0]["questionNumber"], 4);
            assert_eq!(body[0]["url"], GO_DOC);

            let recorded = answer_history.answers(user_id).await?;
            assert_eq!(recorded.len(), 1);
            assert_eq!(recorded[0].question_id, "0000000000000000000000a1");
            assert_eq!(recorded[0].ordinal, 3);
            assert_eq!(recorded[0].answer_choice, 5);
            assert_eq!(recorded[0].lang, Lang::En);

            assert_eq!(metrics_watcher.count("answers.recorded"), 1.0);
            Ok(())
        },
    )
    .await
}

#[actix_rt::test]
async fn answers_keep_their_order() -> Result<()> {
    oboro_test(
        |_| (),
        |TestingTools {
             test_client,
             answer_history,
             ..
         }| async move {
            let user_id = Uuid::new_v4();
            for number in 1..=3 {
                let response = test_client
                    .post(ANSWER)
                    .json(&answer(user_id, number, 2))
                    .send()
                    .await?;
                assert_eq!(response.status(), StatusCode::OK);
            }

            let ordinals: Vec<u32> = answer_history
                .answers(user_id)
                .await?
                .into_iter()
                .map(|record| record.ordinal)
                .collect();
            assert_eq!(ordinals, vec![1, 2, 3]);
            Ok(())
        },
    )
    .await
}

#[actix_rt::test]
async fn answer_is_kept_when_no_question_follows() -> Result<()> {
    oboro_test(
        |_| (),
        |TestingTools {
             test_client,
             answer_history,
             ..
         }| async move {
            let user_id = Uuid::new_v4();
            let mut request = answer(user_id, 1, 1);
            request["questionValue"] = json!("haskell");

            let response = test_client.post(ANSWER).json(&request).send().await?;
            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(answer_history.answers(user_id).await?.len(), 1);
            Ok(())
        },
    )
    .await
}

#[actix_rt::test]
async fn invalid_answers_are_not_recorded() -> Result<()> {
    oboro_test(
        |_| (),
        |TestingTools {
             test_client,
             answer_history,
             mut metrics_watcher,
             ..
         }| async move {
            let user_id = Uuid::new_v4();
            let mut cases = Vec::new();

            let mut request = answer(user_id, 1, 1);
            request["questionID"] = json!("not-a-question");
            cases.push((request, "'questionID' is invalid."));

            let mut request = answer(user_id, 1, 1);
            request["questionAnswerID"] = json!(6);
            cases.push((request, "'questionAnswerID' is invalid."));

            let mut request = answer(user_id, 1, 1);
            request["questionNumber"] = json!(0);
            cases.push((request, "'questionNumber' is invalid."));

            let mut request = answer(user_id, 1, 1);
            request["questionValue"] = json!("");
            cases.push((request, "'questionValue' is invalid."));

            let mut request = answer(user_id, 1, 1);
            request["lang"] = json!("");
            cases.push((request, "'lang' must be 'ja' or 'en'."));

            for (request, message) in cases {
                let response = test_client.post(ANSWER).json(&request).send().await?;
                assert_eq!(response.status(), StatusCode::BAD_REQUEST);

                let body: Value = response.json().await?;
                assert_eq!(body, json!([{ "message": message }]));
            }

            assert_eq!(answer_history.user_count(), 0);
            assert_eq!(metrics_watcher.count("answers.recorded"), 0.0);
            Ok(())
        },
    )
    .await
}
