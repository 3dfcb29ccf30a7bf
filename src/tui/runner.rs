//! Runs service requests off the event loop.
//!
//! Each request becomes one tokio task. Its result comes back through the
//! same `mpsc` channel the event loop drains between frames, as
//! `Action::RequestFinished`.

use std::sync::{Arc, mpsc};
use std::time::Duration;

use log::{debug, info, warn};
use tokio::task::JoinHandle;

use crate::core::action::Action;
use crate::service::{self, Request, Response, ServiceError, TaskService};

pub const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const SPINNER_INTERVAL: Duration = Duration::from_millis(80);

/// Spinner glyph for an operation that has been running for `elapsed`.
pub fn spinner_frame(elapsed: Duration) -> char {
    let step = (elapsed.as_millis() / SPINNER_INTERVAL.as_millis()) as usize;
    SPINNER_FRAMES[step % SPINNER_FRAMES.len()]
}

pub fn spawn_request(
    service: Arc<dyn TaskService>,
    request: Request,
    max_tasks: usize,
    timeout: Option<Duration>,
    tx: mpsc::Sender<Action>,
) -> JoinHandle<()> {
    if request.is_mutation() {
        info!("Spawning {} request: {:?}", service.name(), request);
    } else {
        debug!("Spawning {} request: {:?}", service.name(), request);
    }
    tokio::spawn(async move {
        let result = run_request(&*service, &request, max_tasks, timeout).await;
        if let Err(e) = &result {
            info!("{:?} failed: {}", request, e);
        }
        if tx.send(Action::RequestFinished { request, result }).is_err() {
            warn!("Failed to send request result: receiver dropped");
        }
    })
}

async fn run_request(
    service: &dyn TaskService,
    request: &Request,
    max_tasks: usize,
    timeout: Option<Duration>,
) -> Result<Response, ServiceError> {
    let call = service::execute(service, request, max_tasks);
    match timeout {
        Some(limit) => match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!("{:?} timed out after {:?}", request, limit);
                Err(ServiceError::Timeout(limit))
            }
        },
        None => call.await,
    }
}
