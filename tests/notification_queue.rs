//! Concurrency tests for the notification queue.
//!
//! Producers and pollers run on plain OS threads against one shared queue,
//! the way request handlers share it through `AppState`.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

use catalog::models::notification::{EntityOperation, NotificationEvent};
use catalog::notification::{NotificationQueue, MAX_BATCH};

const PRODUCERS: usize = 4;
const PER_PRODUCER: usize = 250;

fn entity_id(producer: usize, seq: usize) -> String {
    format!("{}-{}", producer, seq)
}

fn parse_entity_id(id: &str) -> (usize, usize) {
    let (p, s) = id.split_once('-').expect("entity id has producer prefix");
    (p.parse().unwrap(), s.parse().unwrap())
}

#[test]
fn test_single_producer_fifo() {
    let queue = NotificationQueue::new();
    for i in 0..50 {
        queue.send("Course", &i.to_string(), EntityOperation::Update, None);
    }
    for i in 0..50 {
        let event = queue.receive().unwrap().expect("event pending");
        assert_eq!(event.entity_id, i.to_string());
    }
    assert!(queue.receive().unwrap().is_none());
}

#[test]
fn test_receive_on_empty_does_not_block() {
    let queue = NotificationQueue::new();
    let start = Instant::now();
    for _ in 0..1000 {
        assert!(queue.receive().unwrap().is_none());
    }
    assert!(queue.receive_batch().unwrap().is_empty());
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[test]
fn test_batch_of_fifteen_splits_ten_and_five() {
    let queue = NotificationQueue::new();
    for i in 0..15 {
        queue.send("Course", &i.to_string(), EntityOperation::Create, None);
    }

    let first: Vec<_> = queue.receive_batch().unwrap();
    let second: Vec<_> = queue.receive_batch().unwrap();

    assert_eq!(first.len(), MAX_BATCH);
    assert_eq!(second.len(), 5);

    let order: Vec<String> = first.iter().chain(second.iter()).map(|e| e.entity_id.clone()).collect();
    let expected: Vec<String> = (0..15).map(|i| i.to_string()).collect();
    assert_eq!(order, expected);
}

#[test]
fn test_competing_consumers_each_event_delivered_once() {
    let queue = Arc::new(NotificationQueue::new());
    let total = PRODUCERS * PER_PRODUCER;
    let received = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(Barrier::new(PRODUCERS * 2));

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|p| {
            let queue = queue.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                for seq in 0..PER_PRODUCER {
                    queue.send("Course", &entity_id(p, seq), EntityOperation::Create, None);
                }
            })
        })
        .collect();

    let consumers: Vec<_> = (0..PRODUCERS)
        .map(|_| {
            let queue = queue.clone();
            let received = received.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                let deadline = Instant::now() + Duration::from_secs(10);
                let mut seen: Vec<NotificationEvent> = Vec::new();
                while received.load(Ordering::SeqCst) < total && Instant::now() < deadline {
                    let batch = queue.receive_batch().unwrap();
                    if batch.is_empty() {
                        thread::yield_now();
                        continue;
                    }
                    received.fetch_add(batch.len(), Ordering::SeqCst);
                    seen.extend(batch);
                }
                seen
            })
        })
        .collect();

    for p in producers {
        p.join().unwrap();
    }
    let per_consumer: Vec<Vec<NotificationEvent>> =
        consumers.into_iter().map(|c| c.join().unwrap()).collect();

    let all: Vec<&NotificationEvent> = per_consumer.iter().flatten().collect();
    assert_eq!(all.len(), total, "every event delivered");
    let ids: HashSet<_> = all.iter().map(|e| e.id).collect();
    assert_eq!(ids.len(), total, "no event delivered twice");
    assert!(queue.is_empty());

    // Each consumer sees a subsequence of the queue order, so a producer's
    // events stay in send order within it.
    for events in &per_consumer {
        let mut last_seq = vec![None::<usize>; PRODUCERS];
        for event in events {
            let (p, seq) = parse_entity_id(&event.entity_id);
            if let Some(prev) = last_seq[p] {
                assert!(seq > prev, "producer {} out of order: {} after {}", p, seq, prev);
            }
            last_seq[p] = Some(seq);
        }
    }
}

#[test]
fn test_concurrent_producers_preserve_per_producer_order() {
    let queue = Arc::new(NotificationQueue::new());

    let handles: Vec<_> = (0..PRODUCERS)
        .map(|p| {
            let queue = queue.clone();
            thread::spawn(move || {
                for seq in 0..PER_PRODUCER {
                    queue.send("Course", &entity_id(p, seq), EntityOperation::Update, None);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(queue.len(), PRODUCERS * PER_PRODUCER);

    let mut next_seq = vec![0usize; PRODUCERS];
    let mut previous_ts = None;
    while let Some(event) = queue.receive().unwrap() {
        let (p, seq) = parse_entity_id(&event.entity_id);
        assert_eq!(seq, next_seq[p]);
        next_seq[p] += 1;

        if let Some(prev) = previous_ts {
            assert!(event.created_at >= prev);
        }
        previous_ts = Some(event.created_at);
    }
    assert!(next_seq.iter().all(|&n| n == PER_PRODUCER));
}

#[test]
fn test_bounded_queue_never_blocks_producers() {
    let queue = Arc::new(NotificationQueue::with_capacity_limit(10));

    let handles: Vec<_> = (0..PRODUCERS)
        .map(|p| {
            let queue = queue.clone();
            thread::spawn(move || {
                for seq in 0..PER_PRODUCER {
                    queue.send("Course", &entity_id(p, seq), EntityOperation::Delete, None);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(queue.capacity_limit(), Some(10));
    assert_eq!(queue.len(), 10);
    assert_eq!(queue.receive_batch().unwrap().len(), 10);
    assert!(queue.is_empty());
}
