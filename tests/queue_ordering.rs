// tests/queue_ordering.rs

use proptest::prelude::*;

use renderq::engine::JobQueue;
use renderq_test_utils::builders::JobRecordBuilder;

fn ids(queue: &mut JobQueue) -> Vec<String> {
    queue.drain_ordered().into_iter().map(|j| j.id).collect()
}

#[test]
fn pop_on_empty_queue_returns_none() {
    let mut queue = JobQueue::new();
    assert!(queue.is_empty());
    assert!(queue.pop().is_none());
    assert!(queue.peek().is_none());
}

#[test]
fn higher_priority_pops_first_regardless_of_insert_order() {
    let mut queue = JobQueue::new();
    queue.push(JobRecordBuilder::new("low").priority(1).build());
    queue.push(JobRecordBuilder::new("high").priority(10).build());
    queue.push(JobRecordBuilder::new("negative").priority(-3).build());
    queue.push(JobRecordBuilder::new("mid").priority(5).build());

    assert_eq!(queue.len(), 4);
    assert_eq!(queue.peek().map(|j| j.id.as_str()), Some("high"));
    assert_eq!(ids(&mut queue), vec!["high", "mid", "low", "negative"]);
}

#[test]
fn equal_priority_pops_earliest_submission_first() {
    let mut queue = JobQueue::new();
    queue.push(JobRecordBuilder::new("late").priority(3).submitted_at_secs(300).build());
    queue.push(JobRecordBuilder::new("early").priority(3).submitted_at_secs(100).build());
    queue.push(JobRecordBuilder::new("middle").priority(3).submitted_at_secs(200).build());

    assert_eq!(ids(&mut queue), vec!["early", "middle", "late"]);
}

#[test]
fn priority_beats_submission_time() {
    let mut queue = JobQueue::new();
    queue.push(JobRecordBuilder::new("old-low").priority(0).submitted_at_secs(1).build());
    queue.push(JobRecordBuilder::new("new-high").priority(1).submitted_at_secs(999).build());

    assert_eq!(ids(&mut queue), vec!["new-high", "old-low"]);
}

#[test]
fn identical_keys_pop_in_insertion_order() {
    let mut queue = JobQueue::new();
    for id in ["a", "b", "c", "d"] {
        queue.push(JobRecordBuilder::new(id).priority(7).submitted_at_secs(42).build());
    }

    assert_eq!(ids(&mut queue), vec!["a", "b", "c", "d"]);
}

#[test]
fn raw_payload_does_not_affect_order() {
    let mut queue = JobQueue::new();
    let mut first = JobRecordBuilder::new("first").priority(2).build();
    first
        .raw_payload
        .insert("zzz".to_string(), serde_json::json!("heavy"));
    let second = JobRecordBuilder::new("second").priority(2).build();

    queue.push(second);
    queue.push(first);

    // Same key, so insertion order decides.
    assert_eq!(ids(&mut queue), vec!["second", "first"]);
}

#[test]
fn interleaved_push_and_pop_always_serves_current_maximum() {
    let mut queue = JobQueue::new();
    queue.push(JobRecordBuilder::new("p1").priority(1).build());
    queue.push(JobRecordBuilder::new("p5").priority(5).build());

    assert_eq!(queue.pop().map(|j| j.id), Some("p5".to_string()));

    queue.push(JobRecordBuilder::new("p3").priority(3).build());
    assert_eq!(queue.pop().map(|j| j.id), Some("p3".to_string()));
    assert_eq!(queue.pop().map(|j| j.id), Some("p1".to_string()));
    assert!(queue.pop().is_none());
}

proptest! {
    #[test]
    fn pops_follow_priority_then_submission_then_insertion(
        jobs in proptest::collection::vec((-5i64..5, 0u64..4), 0..40)
    ) {
        let mut queue = JobQueue::new();
        for (i, (priority, secs)) in jobs.iter().enumerate() {
            queue.push(
                JobRecordBuilder::new(&i.to_string())
                    .priority(*priority)
                    .submitted_at_secs(*secs)
                    .build(),
            );
        }

        let popped: Vec<_> = queue.drain_ordered();
        prop_assert_eq!(popped.len(), jobs.len());

        for pair in popped.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.priority >= b.priority);
            if a.priority == b.priority {
                prop_assert!(a.submitted_at <= b.submitted_at);
                if a.submitted_at == b.submitted_at {
                    let ai: usize = a.id.parse().unwrap();
                    let bi: usize = b.id.parse().unwrap();
                    prop_assert!(ai < bi);
                }
            }
        }
    }
}
