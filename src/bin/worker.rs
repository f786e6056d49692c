//! Standalone worker-pool demonstration. Not wired to the payment service.

use chrono::Local;
use rand::Rng;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::time::{sleep, Duration};

const NUM_TASKS: usize = 100;
const NUM_WORKERS: usize = 5;

#[derive(Debug, Clone, Copy)]
struct Task {
    id: usize,
    value: i64,
}

#[derive(Debug, Clone, Copy)]
struct TaskResult {
    id: usize,
    value: i64,
}

/// Tracks what each worker is currently doing, marking the most recent
/// assignment so it stands out on the board.
struct WorkerStatus {
    workers: HashMap<usize, usize>,
    last_updated: Option<usize>,
}

impl WorkerStatus {
    fn new() -> Self {
        Self {
            workers: HashMap::new(),
            last_updated: None,
        }
    }

    fn update(&mut self, worker_id: usize, task_id: usize) {
        self.workers.insert(worker_id, task_id);
        self.last_updated = Some(worker_id);
    }

    fn print(&self, timestamp: &str) {
        // Repaint from the top-left instead of scrolling.
        print!("\x1B[2J\x1B[1;1H");
        println!("--------[{}]--------", timestamp);
        for worker_id in 1..=NUM_WORKERS {
            if let Some(task_id) = self.workers.get(&worker_id) {
                if self.last_updated == Some(worker_id) {
                    println!("Worker {} started task {} (new)", worker_id, task_id);
                } else {
                    println!("Worker {} started task {}", worker_id, task_id);
                }
            }
        }
    }
}

async fn worker(
    id: usize,
    tasks: Arc<tokio::sync::Mutex<mpsc::Receiver<Task>>>,
    results: mpsc::Sender<TaskResult>,
    status: Arc<Mutex<WorkerStatus>>,
) {
    loop {
        let task = { tasks.lock().await.recv().await };
        let Some(task) = task else { break };

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        {
            let mut status = status.lock().unwrap();
            status.update(id, task.id);
            status.print(&timestamp);
        }

        // Random 1-10s delay so the dynamic scheduling is observable.
        let delay = rand::thread_rng().gen_range(1..=10);
        sleep(Duration::from_secs(delay)).await;

        let _ = results
            .send(TaskResult {
                id: task.id,
                value: task.value,
            })
            .await;
    }
}

#[tokio::main]
async fn main() {
    println!("Starting Worker Pool Demo");
    println!("=========================");

    let (task_sender, task_receiver) = mpsc::channel::<Task>(NUM_TASKS);
    let (result_sender, mut result_receiver) = mpsc::channel::<TaskResult>(NUM_TASKS);
    let task_receiver = Arc::new(tokio::sync::Mutex::new(task_receiver));
    let status = Arc::new(Mutex::new(WorkerStatus::new()));

    println!("Starting {} workers...\n", NUM_WORKERS);
    let mut workers = Vec::with_capacity(NUM_WORKERS);
    for id in 1..=NUM_WORKERS {
        workers.push(tokio::spawn(worker(
            id,
            task_receiver.clone(),
            result_sender.clone(),
            status.clone(),
        )));
    }
    drop(result_sender);

    println!("Sending {} tasks...\n", NUM_TASKS);
    for id in 1..=NUM_TASKS {
        let task = Task {
            id,
            value: id as i64,
        };
        if task_sender.send(task).await.is_err() {
            break;
        }
    }
    drop(task_sender);

    // Keep results in task order, as they arrive out of order.
    let mut results: Vec<Option<TaskResult>> = vec![None; NUM_TASKS];
    while let Some(result) = result_receiver.recv().await {
        results[result.id - 1] = Some(result);
    }

    for handle in workers {
        let _ = handle.await;
    }

    println!("\nWorker pool demo completed!");
}
