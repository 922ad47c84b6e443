//! Tests for agent segmentation

use serde_json::json;

use super::*;

fn make_obs(value: JsonValue) -> Observation {
    serde_json::from_value(value).expect("observation fixture")
}

fn handoff_call(id: &str, target: &str) -> Observation {
    make_obs(json!({
        "id": id,
        "name": "chat-completion",
        "output": {"type": "tool_calls", "output": [
            {"id": "c1", "function": {"name": target, "arguments": "{}"}},
        ]},
    }))
}

fn segment_ids(segment: &AgentSegment) -> Vec<&str> {
    segment.observations.iter().map(|obs| obs.id.as_str()).collect()
}

// ==== boundary predicates ====

#[test]
fn test_handoff_call_with_structured_output() {
    assert!(is_handoff_call(&handoff_call("a", "handoff_to_billing_agent")));
}

#[test]
fn test_handoff_call_with_encoded_output() {
    let obs = make_obs(json!({
        "id": "a",
        "output": r#"{"type": "tool_calls", "output": [{"function": {"name": "handoff_to_support"}}]}"#,
    }));
    assert!(is_handoff_call(&obs));
}

#[test]
fn test_handoff_call_is_case_insensitive() {
    assert!(is_handoff_call(&handoff_call("a", "Handoff_To_Support")));
}

#[test]
fn test_end_call_counts_as_handoff_call() {
    let obs = make_obs(json!({
        "id": "a",
        "output": {"type": "tool_calls", "output": [{"name": "endCall"}]},
    }));
    assert!(is_handoff_call(&obs));
}

#[test]
fn test_plain_outputs_are_not_handoff_calls() {
    let completion = make_obs(json!({
        "id": "a",
        "output": {"type": "completion", "output": [{"name": "handoff_to_x"}]},
    }));
    assert!(!is_handoff_call(&completion));
    assert!(!is_handoff_call(&make_obs(json!({"id": "b"}))));
    let ordinary = make_obs(json!({
        "id": "c",
        "output": {"type": "tool_calls", "output": [{"function": {"name": "get_weather"}}]},
    }));
    assert!(!is_handoff_call(&ordinary));
}

#[test]
fn test_handoff_result_by_name() {
    assert!(is_handoff_result(&make_obs(json!({
        "id": "a", "name": "tool-call handoff_to_billing",
    }))));
    assert!(is_handoff_result(&make_obs(json!({
        "id": "b", "name": "EndCall-confirmation",
    }))));
    assert!(!is_handoff_result(&make_obs(json!({
        "id": "c", "name": "chat-completion",
    }))));
}

#[test]
fn test_handoff_result_by_tool_calls_input() {
    let obs = make_obs(json!({
        "id": "a",
        "input": {"toolCalls": [{"toolCall": {"name": "handoff_to_billing", "input": {}}}]},
    }));
    assert!(is_handoff_result(&obs));
}

#[test]
fn test_handoff_result_by_output_sequence() {
    let structured = make_obs(json!({
        "id": "a",
        "output": [{"name": "endcall", "result": "bye"}],
    }));
    assert!(is_handoff_result(&structured));

    let encoded = make_obs(json!({
        "id": "b",
        "output": r#"[{"name": "handoff_to_x"}]"#,
    }));
    assert!(is_handoff_result(&encoded));
}

#[test]
fn test_ordinary_observation_is_neither() {
    let obs = make_obs(json!({
        "id": "a",
        "name": "chat-completion-3",
        "input": {"messages": []},
        "output": {"type": "completion", "content": "hi"},
    }));
    assert!(!is_handoff_call(&obs));
    assert!(!is_handoff_result(&obs));
}

// ==== segmentation ====

#[test]
fn test_segmentation_drops_handoff_and_skipped_observations() {
    let observations = vec![
        make_obs(json!({"id": "a", "name": "chat-completion-1"})),
        handoff_call("b", "handoff_to_x"),
        make_obs(json!({"id": "c", "name": "tool-response"})),
        make_obs(json!({"id": "d", "name": "chat-completion-2"})),
    ];
    let segments = split_agent_segments(&observations);

    assert_eq!(segments.len(), 2);
    assert_eq!(segment_ids(&segments[0]), vec!["a"]);
    assert_eq!(segment_ids(&segments[1]), vec!["d"]);
}

#[test]
fn test_segment_after_handoff_named_from_target() {
    let observations = vec![
        make_obs(json!({"id": "a", "name": "chat-completion-1"})),
        handoff_call("b", "handoff_to_billing_agent"),
        make_obs(json!({"id": "d", "name": "chat-completion-2"})),
    ];
    let segments = split_agent_segments(&observations);

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[1].agent_name(), "Billing Agent");
}

#[test]
fn test_handoff_result_marks_boundary_without_closing() {
    let observations = vec![
        make_obs(json!({"id": "a", "name": "chat-completion-1"})),
        make_obs(json!({"id": "r", "name": "tool-call handoff_to_x"})),
        make_obs(json!({"id": "c", "name": "tool-response"})),
        make_obs(json!({"id": "d", "name": "chat-completion-2"})),
    ];
    let segments = split_agent_segments(&observations);

    // only a handoff call closes the segment, so a and d stay together
    assert_eq!(segments.len(), 1);
    assert_eq!(segment_ids(&segments[0]), vec!["a", "d"]);
}

#[test]
fn test_skip_clears_only_on_chat_completion_prefix() {
    let observations = vec![
        make_obs(json!({"id": "a", "name": "chat-completion-1"})),
        handoff_call("b", "handoff_to_x"),
        make_obs(json!({"id": "c", "name": "xchat-completion"})),
        make_obs(json!({"id": "d", "name": "chat-completion-2"})),
    ];
    let segments = split_agent_segments(&observations);

    assert_eq!(segments.len(), 2);
    assert_eq!(segment_ids(&segments[1]), vec!["d"]);
}

#[test]
fn test_no_boundaries_yield_single_segment() {
    let observations = vec![
        make_obs(json!({"id": "a", "name": "triage-agent (gpt-4o)"})),
        make_obs(json!({"id": "b", "name": "chat-completion-1"})),
    ];
    let segments = split_agent_segments(&observations);

    assert_eq!(segments.len(), 1);
    assert_eq!(segment_ids(&segments[0]), vec!["a", "b"]);
    assert_eq!(segments[0].agent_name(), "triage-agent");
}

#[test]
fn test_leading_handoff_stores_no_empty_segment() {
    let observations = vec![
        handoff_call("b", "handoff_to_support"),
        make_obs(json!({"id": "d", "name": "chat-completion-1"})),
    ];
    let segments = split_agent_segments(&observations);

    assert_eq!(segments.len(), 1);
    assert_eq!(segment_ids(&segments[0]), vec!["d"]);
    assert_eq!(segments[0].agent_name(), "Support");
}

#[test]
fn test_end_call_boundary_leaves_no_name_hint() {
    let observations = vec![
        make_obs(json!({"id": "a", "name": "chat-completion-1"})),
        make_obs(json!({
            "id": "b",
            "output": {"type": "tool_calls", "output": [{"name": "endcall"}]},
        })),
        make_obs(json!({"id": "d", "name": "chat-completion-2 (final)"})),
    ];
    let segments = split_agent_segments(&observations);

    assert_eq!(segments.len(), 2);
    // no handoff target to carry over, so the fallback name applies
    assert_eq!(segments[1].agent_name(), "chat-completion-2");
}

// ==== agent naming ====

#[test]
fn test_infer_agent_name_from_handoff_output() {
    let segment = vec![handoff_call("a", "handoff_to_customer_support")];
    assert_eq!(infer_agent_name(&segment), "Customer Support");
}

#[test]
fn test_infer_agent_name_fallback_strips_parenthetical() {
    let segment = vec![make_obs(json!({"id": "a", "name": "support-agent (turn 3)"}))];
    assert_eq!(infer_agent_name(&segment), "support-agent");
}

#[test]
fn test_infer_agent_name_empty_segment() {
    assert_eq!(infer_agent_name(&[]), "Agent");
}

#[test]
fn test_infer_agent_name_unnamed_first_observation() {
    let segment = vec![make_obs(json!({"id": "a"}))];
    assert_eq!(infer_agent_name(&segment), "Agent");
}
