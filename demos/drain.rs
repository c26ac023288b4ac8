// Run with: RUST_LOG=debug cargo run --example drain
//
// A bounded string queue built from the index manager plus a payload array,
// torn down with the disable / clear_pop_index protocol.
use dmxp_ringindex::{IndexError, RingIndexManager};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;

struct StringQueue {
    indices: RingIndexManager,
    slots: Vec<Mutex<Option<String>>>,
}

impl StringQueue {
    fn new(capacity: u32) -> Self {
        Self {
            indices: RingIndexManager::new(capacity),
            slots: (0..capacity).map(|_| Mutex::new(None)).collect(),
        }
    }

    fn try_push(&self, value: String) -> Result<(), IndexError> {
        let reservation = self.indices.reserve_push_index()?;
        // the reservation makes this slot ours, the lock is never contended
        *self.slots[reservation.index() as usize].lock() = Some(value);
        self.indices.commit_push_index(reservation);
        Ok(())
    }

    fn try_pop(&self) -> Result<String, IndexError> {
        let reservation = self.indices.reserve_pop_index()?;
        let value = self.slots[reservation.index() as usize].lock().take();
        self.indices.commit_pop_index(reservation);
        Ok(value.unwrap_or_default())
    }

    /// Stop producers and drop every element still queued.
    fn shutdown(&self) -> usize {
        self.indices.disable();
        let (end_generation, end_index) = self.indices.push_position();

        let mut dropped = 0;
        while let Ok(disposed) = self.indices.clear_pop_index(end_generation, end_index) {
            self.slots[disposed.index as usize].lock().take();
            dropped += 1;
        }
        dropped
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let queue = Arc::new(StringQueue::new(64));

    let producers: Vec<_> = (0..3)
        .map(|id| {
            let queue = queue.clone();
            thread::spawn(move || {
                let mut sent = 0u64;
                loop {
                    match queue.try_push(format!("producer {id} message {sent}")) {
                        Ok(()) => sent += 1,
                        Err(IndexError::Full) => thread::yield_now(),
                        Err(_) => return sent,
                    }
                }
            })
        })
        .collect();

    let mut received = 0u64;
    for _ in 0..50_000 {
        if let Ok(message) = queue.try_pop() {
            if received % 10_000 == 0 {
                println!("received: {message}");
            }
            received += 1;
        }
    }

    // producers exit on Disabled; after the join no push is in flight
    queue.indices.disable();
    let sent: u64 = producers.into_iter().map(|h| h.join().unwrap_or(0)).sum();
    let dropped = queue.shutdown() as u64;

    println!("sent {sent}, received {received}, dropped at shutdown {dropped}");
    println!("{}", queue.indices);
    assert_eq!(sent, received + dropped);
}
