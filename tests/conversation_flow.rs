//! End-to-end conversation tests against in-process backends.
//!
//! These drive `Conversation::submit` and `toggle` through full query cycles
//! without any network access.
//!
//! Run with:
//! ```bash
//! cargo test --test conversation_flow
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Notify;

use realestate_chat_sdk::prelude::*;

// ─── Backends ────────────────────────────────────────────────────────────────

/// Replies from a fixed script, in order, and records every request.
struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<Value, QueryError>>>,
    requests: Mutex<Vec<QueryRequest>>,
}

impl ScriptedBackend {
    fn new(replies: impl IntoIterator<Item = Result<Value, QueryError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<QueryRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisBackend for ScriptedBackend {
    async fn query(&self, request: &QueryRequest) -> Result<Value, QueryError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(HttpError::Timeout.into()))
    }
}

/// Blocks every query until the gate is opened, then answers with `reply`.
struct GatedBackend {
    gate: Arc<Notify>,
    reply: Value,
    calls: Mutex<usize>,
}

#[async_trait]
impl AnalysisBackend for GatedBackend {
    async fn query(&self, _request: &QueryRequest) -> Result<Value, QueryError> {
        *self.calls.lock().unwrap() += 1;
        self.gate.notified().await;
        Ok(self.reply.clone())
    }
}

// ─── Fixtures ────────────────────────────────────────────────────────────────

fn wakad() -> Value {
    json!({
        "type": "single",
        "area": "Wakad",
        "summary": "Prices rising",
        "chart": { "labels": ["Jan", "Feb"], "price": [100, 110], "demand": [5, 6] },
        "table": []
    })
}

fn compare_a_b() -> Value {
    json!({
        "type": "compare",
        "results": {
            "A": {
                "area": "A",
                "summary": "A is steady",
                "chart": { "labels": ["2021"], "price": [90.5], "demand": [null] },
                "table": [{ "year": 2021, "price": 90.5 }]
            },
            "B": {
                "summary": "B is climbing",
                "chart": { "labels": ["2021"], "price": [120], "demand": [8] },
                "table": []
            }
        }
    })
}

fn assert_single_pending_last(session: &Session) {
    let pending: Vec<_> = session
        .messages()
        .iter()
        .enumerate()
        .filter(|(_, m)| m.is_pending())
        .map(|(i, _)| i)
        .collect();
    match pending.as_slice() {
        [] => assert!(!session.is_busy()),
        [i] => {
            assert_eq!(*i, session.len() - 1);
            assert!(session.is_busy());
        }
        more => panic!("more than one pending message: {more:?}"),
    }
}

// ─── Single result ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_single_result_resolves_placeholder() {
    let chat = Conversation::new(ScriptedBackend::new([Ok(wakad())]));

    let outcome = chat.submit("Analyze Wakad").await;
    assert!(matches!(outcome, SubmitOutcome::Answered { index: 1 }));

    let session = chat.snapshot().await;
    assert_eq!(session.len(), 2);
    assert!(!session.is_busy());
    assert_eq!(session.get(0).unwrap().role(), Role::User);
    assert_eq!(session.get(0).unwrap().text(), Some("Analyze Wakad"));

    let bot = session.get(1).unwrap();
    assert_eq!(bot.role(), Role::Bot);
    let MessageContent::Single { result, show_chart } = bot.content() else {
        panic!("expected single result, got {:?}", bot.content());
    };
    assert_eq!(result.area, "Wakad");
    assert_eq!(result.summary, "Prices rising");
    assert_eq!(result.chart.labels(), ["Jan", "Feb"]);
    assert_eq!(result.chart.price(), [Some(100.0), Some(110.0)]);
    assert!(!show_chart);
}

#[tokio::test]
async fn test_request_carries_trimmed_query_and_preloaded_flag() {
    let backend = ScriptedBackend::new([Ok(wakad())]);
    let chat = Conversation::new(backend);

    chat.submit("  Analyze Wakad \n").await;

    let requests = chat.backend().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        serde_json::to_value(&requests[0]).unwrap(),
        json!({ "query": "Analyze Wakad", "use_preloaded": true })
    );
    assert_eq!(
        chat.snapshot().await.get(0).unwrap().text(),
        Some("Analyze Wakad")
    );
}

#[tokio::test]
async fn test_single_toggle_round_trip() {
    let chat = Conversation::new(ScriptedBackend::new([Ok(wakad())]));
    chat.submit("Analyze Wakad").await;
    let before = chat.snapshot().await;

    assert_eq!(chat.toggle(&ToggleTarget::message(1)).await, Ok(true));
    assert!(chat
        .snapshot()
        .await
        .is_chart_shown(&ToggleTarget::message(1)));

    assert_eq!(chat.toggle(&ToggleTarget::message(1)).await, Ok(false));
    assert_eq!(chat.snapshot().await, before);
}

// ─── Failures ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_transport_failure_shows_generic_error() {
    let chat = Conversation::new(ScriptedBackend::new([Err(QueryError::Transport(
        HttpError::ServerError {
            status: 503,
            body: "unavailable".into(),
        },
    ))]));

    let outcome = chat.submit("Analyze Foo").await;
    let SubmitOutcome::Failed { index, error } = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert_eq!(index, 1);
    assert_eq!(error.kind(), "transport");

    let session = chat.snapshot().await;
    assert_eq!(session.len(), 2);
    assert!(!session.is_busy());
    assert_eq!(
        session.get(1).unwrap().content(),
        &MessageContent::Error(
            "Sorry — something went wrong while analyzing that query.".to_string()
        )
    );
}

#[tokio::test]
async fn test_failure_causes_are_distinguishable_but_look_the_same() {
    let decode_err = serde_json::from_str::<Value>("<html>").unwrap_err();
    let chat = Conversation::new(ScriptedBackend::new([
        Err(HttpError::Timeout.into()),
        Err(QueryError::Decode(decode_err)),
        Ok(json!({ "type": "table", "rows": [] })),
        Ok(json!({ "area": "Wakad" })),
    ]));

    let mut kinds = Vec::new();
    for query in ["one", "two", "three", "four"] {
        match chat.submit(query).await {
            SubmitOutcome::Failed { error, .. } => kinds.push(error.kind()),
            other => panic!("expected failure, got {other:?}"),
        }
    }
    assert_eq!(
        kinds,
        ["transport", "decode", "classification", "classification"]
    );

    let session = chat.snapshot().await;
    assert_eq!(session.len(), 8);
    for i in [1, 3, 5, 7] {
        assert_eq!(
            session.get(i).unwrap().text(),
            Some(ANALYSIS_FAILED_TEXT),
            "message {i}"
        );
    }
    assert!(!session.is_busy());
}

#[tokio::test]
async fn test_malformed_single_is_classification_failure() {
    let chat = Conversation::new(ScriptedBackend::new([Ok(json!({
        "type": "single",
        "area": "Wakad",
        "summary": "Prices rising",
        "chart": { "labels": ["Jan", "Feb"], "price": [100], "demand": [5, 6] }
    }))]));

    let outcome = chat.submit("Analyze Wakad").await;
    assert!(matches!(
        outcome,
        SubmitOutcome::Failed {
            error: QueryError::Classification(ClassificationError::SeriesLengthMismatch { .. }),
            ..
        }
    ));
}

#[tokio::test]
async fn test_can_resubmit_after_failure() {
    let chat = Conversation::new(ScriptedBackend::new([
        Err(HttpError::Timeout.into()),
        Ok(wakad()),
    ]));

    assert!(matches!(
        chat.submit("Analyze Wakad").await,
        SubmitOutcome::Failed { .. }
    ));
    assert!(!chat.is_busy().await);
    assert!(matches!(
        chat.submit("Analyze Wakad").await,
        SubmitOutcome::Answered { index: 3 }
    ));
}

// ─── Comparison ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_compare_result_and_area_toggle() {
    let chat = Conversation::new(ScriptedBackend::new([Ok(compare_a_b())]));
    chat.submit("Compare A and B").await;

    let session = chat.snapshot().await;
    let MessageContent::Compare { result, toggles } = session.get(1).unwrap().content() else {
        panic!("expected comparison");
    };
    let keys: Vec<_> = result.keys().map(AreaKey::as_str).collect();
    assert_eq!(keys, ["A", "B"]);
    assert_eq!(result.get("B").unwrap().area, "B");
    assert_eq!(toggles.len(), 2);
    assert!(!toggles.is_shown("A"));
    assert!(!toggles.is_shown("B"));

    assert_eq!(chat.toggle(&ToggleTarget::area(1, "A")).await, Ok(true));
    let session = chat.snapshot().await;
    assert!(session.is_chart_shown(&ToggleTarget::area(1, "A")));
    assert!(!session.is_chart_shown(&ToggleTarget::area(1, "B")));
}

#[tokio::test]
async fn test_empty_compare_is_valid() {
    let chat = Conversation::new(ScriptedBackend::new([Ok(
        json!({ "type": "compare", "results": {} }),
    )]));

    assert!(matches!(
        chat.submit("Compare nothing").await,
        SubmitOutcome::Answered { index: 1 }
    ));

    let session = chat.snapshot().await;
    let views = session.views();
    let MessageView::Comparison(view) = &views[1] else {
        panic!("expected comparison view");
    };
    assert!(view.panels.is_empty());
    assert_eq!(view.heading(), "No comparable areas found for this query.");
}

#[tokio::test]
async fn test_toggles_are_isolated_across_messages() {
    let chat = Conversation::new(ScriptedBackend::new([
        Ok(wakad()),
        Ok(compare_a_b()),
        Ok(wakad()),
    ]));
    for q in ["Analyze Wakad", "Compare A and B", "Analyze Wakad again"] {
        chat.submit(q).await;
    }

    chat.toggle(&ToggleTarget::area(3, "B")).await.unwrap();
    chat.toggle(&ToggleTarget::message(5)).await.unwrap();

    let session = chat.snapshot().await;
    assert!(!session.is_chart_shown(&ToggleTarget::message(1)));
    assert!(!session.is_chart_shown(&ToggleTarget::area(3, "A")));
    assert!(session.is_chart_shown(&ToggleTarget::area(3, "B")));
    assert!(session.is_chart_shown(&ToggleTarget::message(5)));
}

#[tokio::test]
async fn test_bad_toggle_addresses_are_no_ops() {
    let chat = Conversation::new(ScriptedBackend::new([Ok(wakad()), Ok(compare_a_b())]));
    chat.submit("Analyze Wakad").await;
    chat.submit("Compare A and B").await;
    let before = chat.snapshot().await;

    let targets = [
        ToggleTarget::message(42),
        ToggleTarget::message(0),
        ToggleTarget::area(1, "Wakad"),
        ToggleTarget::message(3),
        ToggleTarget::area(3, "C"),
    ];
    for target in &targets {
        let err = chat.toggle(target).await.unwrap_err();
        assert!(err.is_toggle_address(), "{target:?}: {err}");
    }
    assert_eq!(chat.snapshot().await, before);
}

// ─── Input and re-entrancy ───────────────────────────────────────────────────

#[tokio::test]
async fn test_blank_submit_is_ignored() {
    let chat = Conversation::new(ScriptedBackend::new([Ok(wakad())]));

    for text in ["", "   ", "\t\n"] {
        assert!(matches!(chat.submit(text).await, SubmitOutcome::Ignored));
    }

    assert!(chat.snapshot().await.is_empty());
    assert!(!chat.is_busy().await);
    assert!(chat.backend().requests().is_empty());
}

#[tokio::test]
async fn test_submit_while_busy_is_rejected() {
    let gate = Arc::new(Notify::new());
    let chat = Conversation::new(GatedBackend {
        gate: gate.clone(),
        reply: wakad(),
        calls: Mutex::new(0),
    });

    let (first, second) = tokio::join!(chat.submit("Analyze Wakad"), async {
        while !chat.is_busy().await {
            tokio::task::yield_now().await;
        }
        let during = chat.snapshot().await;
        assert_eq!(during.len(), 2);
        assert_single_pending_last(&during);

        let outcome = chat.submit("Compare A and B").await;
        assert_eq!(chat.snapshot().await, during);

        gate.notify_one();
        outcome
    });

    assert!(matches!(first, SubmitOutcome::Answered { index: 1 }));
    assert!(matches!(
        second,
        SubmitOutcome::Rejected(SessionError::Reentrant)
    ));
    assert!(!second.is_applied());
    assert_eq!(*chat.backend().calls.lock().unwrap(), 1);

    let session = chat.snapshot().await;
    assert_eq!(session.len(), 2);
    assert_single_pending_last(&session);
}

#[tokio::test]
async fn test_cancelled_submit_frees_the_session() {
    let gate = Arc::new(Notify::new());
    let chat = Conversation::new(GatedBackend {
        gate: gate.clone(),
        reply: wakad(),
        calls: Mutex::new(0),
    });

    let timed_out =
        tokio::time::timeout(Duration::from_millis(50), chat.submit("Analyze A")).await;
    assert!(timed_out.is_err());

    let session = chat.snapshot().await;
    assert_eq!(session.len(), 2);
    assert_single_pending_last(&session);
    assert!(!session.is_busy());
    assert_eq!(session.get(1).unwrap().text(), Some(ANALYSIS_FAILED_TEXT));

    gate.notify_one();
    assert!(matches!(
        chat.submit("Analyze B").await,
        SubmitOutcome::Answered { index: 3 }
    ));
    assert_eq!(*chat.backend().calls.lock().unwrap(), 2);
}

#[tokio::test]
async fn test_n_submits_alternate_roles() {
    let n = 5;
    let chat = Conversation::new(ScriptedBackend::new(
        (0..n).map(|i| if i % 2 == 0 { Ok(wakad()) } else { Ok(compare_a_b()) }),
    ));

    for i in 0..n {
        let outcome = chat.submit(&format!("query {i}")).await;
        assert!(outcome.is_applied());
        assert_single_pending_last(&chat.snapshot().await);
    }

    let session = chat.snapshot().await;
    assert_eq!(session.len(), 2 * n);
    for (i, message) in session.messages().iter().enumerate() {
        let expected = if i % 2 == 0 { Role::User } else { Role::Bot };
        assert_eq!(message.role(), expected, "message {i}");
        assert!(!message.is_pending());
    }
    assert!(!session.is_busy());
}

// ─── Rendering ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_views_during_and_after_query() {
    let gate = Arc::new(Notify::new());
    let chat = Conversation::new(GatedBackend {
        gate: gate.clone(),
        reply: wakad(),
        calls: Mutex::new(0),
    });

    let (_, pending_text) = tokio::join!(chat.submit("Analyze Wakad"), async {
        while !chat.is_busy().await {
            tokio::task::yield_now().await;
        }
        let session = chat.snapshot().await;
        let text = session.views()[1].text().map(str::to_string);
        gate.notify_one();
        text
    });
    assert_eq!(pending_text.as_deref(), Some("Analyzing..."));

    chat.toggle(&ToggleTarget::message(1)).await.unwrap();
    let session = chat.snapshot().await;
    let views = session.views();
    assert_eq!(views[0], MessageView::User("Analyze Wakad"));
    let MessageView::Summary(summary) = &views[1] else {
        panic!("expected summary view");
    };
    assert_eq!(summary.area, "Wakad");
    assert_eq!(summary.toggle_label(), "Hide chart");
    let points: Vec<_> = summary.chart.unwrap().points().map(|p| p.label).collect();
    assert_eq!(points, ["Jan", "Feb"]);
}
