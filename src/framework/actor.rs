//! # Generic Actor Server
//!
//! [`ResourceActor`] owns the store for one entity type and processes its mailbox
//! sequentially. Every read-modify-write an entity performs inside a hook happens
//! without another request for the same actor interleaving, which is what makes
//! stock adjustments and status changes atomic without locks.

use super::client::ResourceClient;
use super::entity::ActorEntity;
use super::error::FrameworkError;
use super::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new()` returns the actor (server) and a client.
/// 2. **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3. **Run**: spawn the run loop on a Tokio task.
///
/// # Operations
///
/// * **Create**: allocate the next id, `from_create_params`, `on_create`, enforce
///   `unique_key` (rolling back through `on_discard` on collision), insert.
/// * **Get** / **List**: clone out of the store.
/// * **Update**: `on_update` on the stored entity, return the new state.
/// * **Delete**: `on_delete`, then remove.
/// * **Action**: `handle_action` on the stored entity, return its result.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id: u32,
    entity_type: &'static str,
}

fn entity_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> FrameworkError {
    FrameworkError::EntityError(Box::new(e))
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates the actor and its client.
    ///
    /// `buffer_size` is the mailbox capacity; senders wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        // "Order" rather than "fuseloja::model::order::Order"
        let entity_type = std::any::type_name::<T>()
            .rsplit("::")
            .next()
            .unwrap_or("Unknown");
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
            entity_type,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the event loop until every client has been dropped.
    ///
    /// `context` is handed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = self.entity_type;
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let _ = respond_to.send(self.create(params, &context).await);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let _ = respond_to.send(self.update(id, update, &context).await);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let _ = respond_to.send(self.delete(id, &context).await);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let _ = respond_to.send(self.act(id, action, &context).await);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn create(
        &mut self,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T::Id, FrameworkError> {
        let entity_type = self.entity_type;
        let id = T::Id::from(self.next_id);

        let mut item = T::from_create_params(id.clone(), params).map_err(|e| {
            warn!(entity_type, error = %e, "Create rejected");
            entity_error(e)
        })?;
        if let Err(e) = item.on_create(context).await {
            warn!(entity_type, error = %e, "on_create failed");
            return Err(entity_error(e));
        }

        if let Some(key) = item.unique_key().filter(|key| self.key_taken(key)) {
            warn!(entity_type, %key, "Unique key collision");
            if let Err(e) = item.on_discard(context).await {
                warn!(entity_type, error = %e, "on_discard failed");
            }
            return Err(FrameworkError::Conflict(key));
        }

        self.next_id += 1;
        self.store.insert(id.clone(), item);
        info!(entity_type, %id, size = self.store.len(), "Created");
        Ok(id)
    }

    fn key_taken(&self, key: &str) -> bool {
        self.store
            .values()
            .any(|other| other.unique_key().as_deref() == Some(key))
    }

    fn not_found(entity_type: &'static str, id: &T::Id) -> FrameworkError {
        warn!(entity_type, %id, "Not found");
        FrameworkError::NotFound(id.to_string())
    }

    async fn update(
        &mut self,
        id: T::Id,
        update: T::Update,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        let entity_type = self.entity_type;
        let Some(item) = self.store.get_mut(&id) else {
            return Err(Self::not_found(entity_type, &id));
        };
        if let Err(e) = item.on_update(update, context).await {
            warn!(entity_type, %id, error = %e, "Update failed");
            return Err(entity_error(e));
        }
        info!(entity_type, %id, "Updated");
        Ok(item.clone())
    }

    async fn delete(&mut self, id: T::Id, context: &T::Context) -> Result<(), FrameworkError> {
        let entity_type = self.entity_type;
        let Some(item) = self.store.get(&id) else {
            return Err(Self::not_found(entity_type, &id));
        };
        if let Err(e) = item.on_delete(context).await {
            warn!(entity_type, %id, error = %e, "on_delete failed");
            return Err(entity_error(e));
        }
        self.store.remove(&id);
        info!(entity_type, %id, size = self.store.len(), "Deleted");
        Ok(())
    }

    async fn act(
        &mut self,
        id: T::Id,
        action: T::Action,
        context: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        let entity_type = self.entity_type;
        let Some(item) = self.store.get_mut(&id) else {
            return Err(Self::not_found(entity_type, &id));
        };
        match item.handle_action(action, context).await {
            Ok(result) => {
                info!(entity_type, %id, "Action ok");
                Ok(result)
            }
            Err(e) => {
                warn!(entity_type, %id, error = %e, "Action failed");
                Err(entity_error(e))
            }
        }
    }
}
