//! Sequential batch runner.
//!
//! Items are processed strictly in input order, one at a time. The runner is
//! the only place that decides what a failed item turns into: with error
//! isolation it becomes an [`ErrorRecord`] on the second channel and the
//! batch continues; without it the run stops at that item.

use teamdeck::{
    is_blank, ErrorRecord, InputItem, NodeOutput, OutputRecord, RequestHelper, TeamdeckError,
};
use tracing::{debug, error, info, warn};

use crate::node::{HandlerOutput, ItemProcessor};

/// Run-level failure in abort mode, tied to the failing item.
#[derive(Debug, thiserror::Error)]
#[error("item {item_index}: {source}")]
pub struct ExecutionError {
    pub item_index: usize,
    #[source]
    pub source: TeamdeckError,
}

/// Runs `processor` over every item and collects the output channels.
///
/// Success records keep input order; the records of a getAll item follow
/// each other in the order the upstream API returned them. In abort mode no
/// partial output is returned.
pub async fn run_batch(
    processor: &dyn ItemProcessor,
    helper: &dyn RequestHelper,
    items: &[InputItem],
    continue_on_fail: bool,
) -> Result<NodeOutput, ExecutionError> {
    info!(items = items.len(), continue_on_fail, "Starting batch");
    let mut output = NodeOutput::default();

    for (item_index, item) in items.iter().enumerate() {
        match process_item(processor, helper, item_index, item).await {
            Ok(records) => {
                debug!(item_index, records = records.len(), "Item processed");
                output.success.extend(records);
            }
            Err(err) if continue_on_fail => {
                warn!(item_index, error = %err, "Item failed, recording error");
                output
                    .errors
                    .push(ErrorRecord::from_error(&err, item_index, &item.json));
            }
            Err(err) => {
                error!(item_index, error = %err, "Item failed, aborting run");
                return Err(ExecutionError {
                    item_index,
                    source: err,
                });
            }
        }
    }

    info!(
        success = output.success.len(),
        errors = output.errors.len(),
        "Batch finished"
    );
    Ok(output)
}

async fn process_item(
    processor: &dyn ItemProcessor,
    helper: &dyn RequestHelper,
    item_index: usize,
    item: &InputItem,
) -> Result<Vec<OutputRecord>, TeamdeckError> {
    let outcome = processor.process(helper, item_index, item).await?;
    let pass_through = outcome.pass_through.as_ref();

    match outcome.output {
        HandlerOutput::Many(values) => Ok(values
            .into_iter()
            .map(|value| OutputRecord::new(value, pass_through))
            .collect()),
        HandlerOutput::Single(value) => {
            if is_blank(&value) {
                return Err(TeamdeckError::InvalidResponse);
            }
            Ok(vec![OutputRecord::new(value, pass_through)])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::ItemOutcome;
    use crate::testing::RecordingHelper;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use teamdeck::ApiRequest;

    /// Fetches `/things/{index}`; items whose payload has `"list": true`
    /// are emitted as a listing.
    struct FetchThing;

    #[async_trait]
    impl ItemProcessor for FetchThing {
        async fn process(
            &self,
            helper: &dyn RequestHelper,
            item_index: usize,
            item: &InputItem,
        ) -> Result<ItemOutcome, TeamdeckError> {
            let response = helper
                .request(ApiRequest::get(format!("/things/{}", item_index)))
                .await?;
            let output = match response.body {
                Value::Array(values) if item.json["list"] == json!(true) => {
                    HandlerOutput::Many(values)
                }
                body => HandlerOutput::Single(body),
            };
            Ok(ItemOutcome {
                output,
                pass_through: item.json.get("extra").cloned(),
            })
        }
    }

    fn items(n: usize) -> Vec<InputItem> {
        (0..n)
            .map(|i| InputItem {
                json: json!({"n": i}),
                ..Default::default()
            })
            .collect()
    }

    fn not_found() -> TeamdeckError {
        TeamdeckError::Upstream {
            status: Some(404),
            message: "Teamdeck API error: 404 Not Found".to_string(),
            detail: Some("Project not found".to_string()),
        }
    }

    #[tokio::test]
    async fn test_isolated_failure_keeps_other_items() {
        let helper = RecordingHelper::new();
        helper
            .push_json(json!({"id": 0}))
            .push_error(not_found())
            .push_json(json!({"id": 2}));

        let output = run_batch(&FetchThing, &helper, &items(3), true)
            .await
            .unwrap();

        let ids: Vec<&Value> = output.success.iter().map(|r| &r.json["id"]).collect();
        assert_eq!(ids, vec![&json!(0), &json!(2)]);
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.channels(), 2);

        let record = &output.errors[0];
        assert_eq!(record.item_index, 1);
        assert_eq!(record.status_code, Some(404));
        assert_eq!(record.details, "Project not found");
        assert_eq!(record.original_item, Some(json!({"n": 1})));
        assert_eq!(helper.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_abort_mode_stops_before_next_item() {
        let helper = RecordingHelper::new();
        helper
            .push_json(json!({"id": 0}))
            .push_error(not_found())
            .push_json(json!({"id": 2}));

        let err = run_batch(&FetchThing, &helper, &items(3), false)
            .await
            .unwrap_err();

        assert_eq!(err.item_index, 1);
        assert_eq!(err.source.status_code(), Some(404));
        assert!(err.to_string().starts_with("item 1: "));
        // Item 2 is never attempted.
        assert_eq!(helper.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_no_errors_means_single_channel() {
        let helper = RecordingHelper::new();
        helper.push_json(json!({"id": 0})).push_json(json!({"id": 1}));

        let output = run_batch(&FetchThing, &helper, &items(2), true)
            .await
            .unwrap();
        assert_eq!(output.success.len(), 2);
        assert_eq!(output.channels(), 1);
    }

    #[tokio::test]
    async fn test_listing_records_follow_item_order() {
        let helper = RecordingHelper::new();
        helper
            .push_json(json!({"id": "a"}))
            .push_json(json!([{"id": "b1"}, {"id": "b2"}]))
            .push_json(json!({"id": "c"}));

        let mut batch = items(3);
        batch[1].json = json!({"list": true});

        let output = run_batch(&FetchThing, &helper, &batch, false)
            .await
            .unwrap();
        let ids: Vec<&Value> = output.success.iter().map(|r| &r.json["id"]).collect();
        assert_eq!(ids, vec![&json!("a"), &json!("b1"), &json!("b2"), &json!("c")]);
    }

    #[tokio::test]
    async fn test_empty_listing_emits_nothing() {
        let helper = RecordingHelper::new();
        helper.push_json(json!([]));

        let mut batch = items(1);
        batch[0].json = json!({"list": true});

        let output = run_batch(&FetchThing, &helper, &batch, false)
            .await
            .unwrap();
        assert!(output.success.is_empty());
        assert_eq!(output.channels(), 1);
    }

    #[tokio::test]
    async fn test_blank_single_result_is_invalid_response() {
        let helper = RecordingHelper::new();
        helper
            .push_json(json!({"id": null, "name": null}))
            .push_json(Value::Null);

        let output = run_batch(&FetchThing, &helper, &items(2), true)
            .await
            .unwrap();
        assert!(output.success.is_empty());
        assert_eq!(output.errors.len(), 2);
        assert!(output
            .errors
            .iter()
            .all(|e| e.error == "Invalid API response received" && e.status_code.is_none()));
    }

    #[tokio::test]
    async fn test_pass_through_is_attached_to_every_record() {
        let helper = RecordingHelper::new();
        helper.push_json(json!([{"id": 1}, {"id": 2}]));

        let batch = vec![InputItem {
            json: json!({"list": true, "extra": {"run": "nightly"}}),
            ..Default::default()
        }];

        let output = run_batch(&FetchThing, &helper, &batch, false)
            .await
            .unwrap();
        assert_eq!(output.success.len(), 2);
        for record in &output.success {
            assert_eq!(record.json["additionalJson"], json!({"run": "nightly"}));
        }
    }
}
