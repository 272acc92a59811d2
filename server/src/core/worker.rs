//! Worker pool for background jobs, with two priority levels and
//! configurable worker threads.
//!
//! The settings subsystem only uses the low-priority lane (CSV exports),
//! but the pool is shared platform infrastructure.

use flume::{Receiver, Sender};
use futures::channel::oneshot;
use std::{sync::Arc, thread};

use crate::prelude::*;

#[derive(Clone, Copy, Debug)]
pub enum Priority {
	High,
	Low,
}

type Job = Box<dyn FnOnce() + Send>;

#[derive(Debug)]
pub struct WorkerPool {
	tx_high: Sender<Job>,
	tx_low: Sender<Job>,
}

impl WorkerPool {
	/// Start a pool with `n_high` workers dedicated to high-priority jobs
	/// and `n_shared` workers that drain both queues (high first).
	pub fn new(n_high: usize, n_shared: usize) -> Arc<Self> {
		let (tx_high, rx_high) = flume::unbounded();
		let (tx_low, rx_low) = flume::unbounded();

		let rx_high = Arc::new(rx_high);
		let rx_low = Arc::new(rx_low);

		for _ in 0..n_high {
			let rx_high = Arc::clone(&rx_high);
			thread::spawn(move || worker_loop(vec![rx_high]));
		}

		for _ in 0..n_shared.max(1) {
			let rx_high = Arc::clone(&rx_high);
			let rx_low = Arc::clone(&rx_low);
			thread::spawn(move || worker_loop(vec![rx_high, rx_low]));
		}

		Arc::new(Self { tx_high, tx_low })
	}

	/// Submit a closure and get a future for its result.
	pub fn spawn<F, T>(&self, priority: Priority, f: F) -> impl std::future::Future<Output = SlResult<T>>
	where
		F: FnOnce() -> T + Send + 'static,
		T: Send + 'static,
	{
		let (res_tx, res_rx) = oneshot::channel();

		let job: Job = Box::new(move || {
			let result = f();
			let _ignore = res_tx.send(result);
		});

		self.submit(priority, job);

		async move {
			res_rx.await.map_err(|_| {
				error!("Worker dropped result channel without sending");
				Error::ServiceUnavailable("worker pool lost result".into())
			})
		}
	}

	/// Submit a fire-and-forget closure. The caller never observes the
	/// outcome; the job logs its own failures.
	pub fn fire<F>(&self, priority: Priority, f: F)
	where
		F: FnOnce() + Send + 'static,
	{
		self.submit(priority, Box::new(f));
	}

	fn submit(&self, priority: Priority, job: Job) {
		let res = match priority {
			Priority::High => self.tx_high.send(job),
			Priority::Low => self.tx_low.send(job),
		};
		if res.is_err() {
			error!("Failed to send job to {:?} priority worker queue", priority);
		}
	}
}

fn worker_loop(queues: Vec<Arc<Receiver<Job>>>) {
	loop {
		// Try higher-priority queues first (non-blocking)
		let mut job = None;
		for rx in &queues {
			if let Ok(j) = rx.try_recv() {
				job = Some(j);
				break;
			}
		}

		if let Some(job) = job {
			job();
			continue;
		}

		// Wait for next job
		let mut selector = flume::Selector::new();
		for rx in &queues {
			selector = selector.recv(rx, |res| res);
		}

		let job: Result<Job, flume::RecvError> = selector.wait();
		if let Ok(job) = job {
			job()
		}
	}
}


// vim: ts=4
