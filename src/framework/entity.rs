//! The [`ActorEntity`] contract that every stored resource implements.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by
/// [`ResourceActor`](super::ResourceActor).
///
/// Products and orders both satisfy this contract, so the message loop is written once.
/// Associated types keep payloads apart: an `Order` actor only accepts `OrderCreate`.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so they can call other actors. The `Context` type is injected
/// into every hook at `run()` time ("late binding"), which is how the Order actor reaches the
/// Product actor without the two being constructed in a particular order.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier allocated by the actor. Must be convertible from the actor's `u32` counter.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Creation payload.
    type Create: Send + Sync + Debug;

    /// Update payload.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations (e.g. `AdjustStock`).
    type Action: Send + Sync + Debug;

    /// Result returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into the actor. Use `()` if none are needed.
    type Context: Send + Sync;

    /// One error enum per actor; it must be a real `std::error::Error` so clients can
    /// downcast it back out of [`FrameworkError::EntityError`](super::FrameworkError::EntityError).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the entity from its id and payload. Synchronous; runs before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Key that must be unique across the whole store, like a unique column.
    ///
    /// Only consulted after `on_create`, so it may depend on values assigned there.
    fn unique_key(&self) -> Option<String> {
        None
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after construction, before the entity is stored. A failure aborts the create.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when a create is rejected after `on_create` already succeeded
    /// (currently: a `unique_key` collision). Undo whatever `on_create` did.
    async fn on_discard(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
