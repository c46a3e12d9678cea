//! # Mock Framework
//!
//! Lets a test drive a real actor against scripted dependencies, e.g. the Order actor
//! with a Product actor that answers exactly what the test says.
//!
//! Two styles:
//! - [`MockClient`]: queue expectations up front, then [`MockClient::verify`].
//! - [`create_mock_client`] + [`expect_action`] etc.: receive each request by hand and reply.

use super::{ActorEntity, FrameworkError, ResourceClient, ResourceRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{mpsc, oneshot};

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn lock<T: ActorEntity>(queue: &Queue<T>) -> MutexGuard<'_, VecDeque<Expectation<T>>> {
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The reply scripted for one request kind.
enum Scripted<T: ActorEntity> {
    Get(Result<Option<T>, FrameworkError>),
    Create(Result<T::Id, FrameworkError>),
    Action(Result<T::ActionResult, FrameworkError>),
}

struct Expectation<T: ActorEntity> {
    /// `None` for creates, which carry no id.
    id: Option<T::Id>,
    reply: Scripted<T>,
}

/// A mock client that replays queued expectations in order.
///
/// Requests arriving out of order, or with a different id than expected, panic the
/// mock's task; the caller then sees [`FrameworkError::ActorDropped`].
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<Product>::new();
/// mock.expect_get(ProductId(1)).return_ok(Some(product));
/// mock.expect_action(ProductId(1)).return_ok(ProductActionResult::Stock(8));
///
/// let client = ProductClient::new(mock.client());
/// // drive the code under test...
/// mock.verify();
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let Some(Expectation { id: expected, reply }) = lock(&queue).pop_front() else {
                    panic!("Unexpected request: nothing left to replay");
                };

                match (request, reply) {
                    (ResourceRequest::Get { id, respond_to }, Scripted::Get(reply)) => {
                        assert_eq!(Some(id), expected, "get for unexpected id");
                        let _ = respond_to.send(reply);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Scripted::Create(reply)) => {
                        let _ = respond_to.send(reply);
                    }
                    (ResourceRequest::Action { id, respond_to, .. }, Scripted::Action(reply)) => {
                        assert_eq!(Some(id), expected, "action for unexpected id");
                        let _ = respond_to.send(reply);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn reply<R>(
        &self,
        id: Option<T::Id>,
        wrap: fn(Result<R, FrameworkError>) -> Scripted<T>,
    ) -> Reply<T, R> {
        Reply {
            id,
            wrap,
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_get(&mut self, id: T::Id) -> Reply<T, Option<T>> {
        self.reply(Some(id), Scripted::Get)
    }

    pub fn expect_create(&mut self) -> Reply<T, T::Id> {
        self.reply(None, Scripted::Create)
    }

    pub fn expect_action(&mut self, id: T::Id) -> Reply<T, T::ActionResult> {
        self.reply(Some(id), Scripted::Action)
    }

    /// Panics unless every queued expectation was consumed.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Finishes an expectation with the value (or error) the mock should answer.
pub struct Reply<T: ActorEntity, R> {
    id: Option<T::Id>,
    wrap: fn(Result<R, FrameworkError>) -> Scripted<T>,
    expectations: Queue<T>,
}

impl<T: ActorEntity, R> Reply<T, R> {
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        lock(&self.expectations).push_back(Expectation {
            id: self.id,
            reply: (self.wrap)(response),
        });
    }
}

// =============================================================================
// MANUAL HELPERS
// =============================================================================

/// Creates a client whose requests land on a receiver the test controls.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next message must be a `Get`.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next message must be an `Action`.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
