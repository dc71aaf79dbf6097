//! Tests for intent classification with a stub oracle.

mod common;

use common::{FailingOracle, StubOracle};
use std::sync::Arc;
use std::time::Duration;
use tictalk::{ClassifyError, Intent, IntentClassifier, Oracle, RetryPolicy};

fn zero_delay(max_attempts: u32) -> RetryPolicy {
    RetryPolicy::new(max_attempts, Duration::ZERO)
}

#[tokio::test]
async fn test_exact_match_resolves_first_attempt() {
    let oracle = Arc::new(StubOracle::always("move"));
    let classifier = IntentClassifier::new(oracle.clone(), zero_delay(3));

    let intent = classifier.classify("I want to move to position 5").await;
    assert_eq!(intent.unwrap(), Intent::Move);
    assert_eq!(oracle.calls(), 1);
}

#[tokio::test]
async fn test_casing_and_quotes_are_normalized() {
    for reply in ["Move", "'move'", "\"MOVE\"", "  move  "] {
        let oracle = Arc::new(StubOracle::always(reply));
        let classifier = IntentClassifier::new(oracle.clone(), zero_delay(3));

        let intent = classifier.classify("go to 5").await;
        assert_eq!(intent.unwrap(), Intent::Move, "reply {reply:?}");
        assert_eq!(oracle.calls(), 1, "reply {reply:?}");
    }
}

#[tokio::test]
async fn test_all_three_intents_parse() {
    for (reply, expected) in [
        ("move", Intent::Move),
        ("discuss", Intent::Discuss),
        ("offtopic", Intent::OffTopic),
    ] {
        let oracle = Arc::new(StubOracle::always(reply));
        let classifier = IntentClassifier::new(oracle, zero_delay(3));
        assert_eq!(classifier.classify("hello").await.unwrap(), expected);
    }
}

#[tokio::test]
async fn test_unrecognized_reply_exhausts_exactly_max_attempts() {
    let oracle = Arc::new(StubOracle::always("probably a move, yes"));
    let classifier = IntentClassifier::new(oracle.clone(), zero_delay(3));

    let result = classifier.classify("I want to place my piece on 99").await;
    assert_eq!(result, Err(ClassifyError::Exhausted { attempts: 3 }));
    assert_eq!(oracle.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_delay_elapses_between_attempts_but_not_after_the_last() {
    let delay = Duration::from_secs(1);
    let oracle = Arc::new(StubOracle::always("probably a move, yes"));
    let classifier = IntentClassifier::new(oracle.clone(), RetryPolicy::new(3, delay));

    let start = tokio::time::Instant::now();
    let result = classifier.classify("???").await;
    assert_eq!(result, Err(ClassifyError::Exhausted { attempts: 3 }));

    // Attempt N+1 starts only after the configured delay has elapsed
    let instants = oracle.call_instants();
    assert_eq!(instants.len(), 3);
    assert_eq!(instants[1] - instants[0], delay);
    assert_eq!(instants[2] - instants[1], delay);

    // Two pauses between three attempts, and none after the final one
    assert_eq!(start.elapsed(), delay * 2);
}

#[tokio::test]
async fn test_recovers_on_later_attempt() {
    let oracle = Arc::new(StubOracle::scripted(["garbage", "also garbage", "discuss"]));
    let classifier = IntentClassifier::new(oracle.clone(), zero_delay(3));

    let intent = classifier.classify("where should I move next?").await;
    assert_eq!(intent.unwrap(), Intent::Discuss);
    assert_eq!(oracle.calls(), 3);
}

#[tokio::test]
async fn test_transport_errors_are_retried_then_surfaced() {
    let classifier = IntentClassifier::new(Arc::new(FailingOracle), zero_delay(2));

    let result = classifier.classify("move to 1").await;
    assert_eq!(result, Err(ClassifyError::Exhausted { attempts: 2 }));
}

#[tokio::test]
async fn test_fragmented_reply_is_assembled_before_matching() {
    // The stub splits every reply into two fragments; a match proves
    // the classifier assembled them in emission order.
    let oracle = Arc::new(StubOracle::always("offtopic"));
    let reply = oracle
        .complete(vec![tictalk::Message::user("hi")])
        .await
        .unwrap();
    assert_eq!(reply, "offtopic");

    let classifier = IntentClassifier::new(oracle, zero_delay(1));
    assert_eq!(
        classifier.classify("tell me a joke").await.unwrap(),
        Intent::OffTopic
    );
}
