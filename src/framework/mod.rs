//! Generic resource-actor framework.
//!
//! - [`ActorEntity`] - contract a stored resource implements
//! - [`ResourceActor`] - task that owns a store and serialises access to it
//! - [`ResourceClient`] - cloneable async handle to an actor
//! - [`ActorClient`] - shared `get`/`list`/`delete` for domain clients
//! - [`FrameworkError`] - plumbing errors plus boxed entity errors
//!
//! See [`mock`] for testing clients and actors without their real dependencies.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};

/// Generates the `new` constructor, the [`ActorClient`] impl, and `get_<name>` / `delete_<name>`
/// shorthands for a domain client wrapping `ResourceClient<$entity>`.
///
/// `$map` is a `fn(FrameworkError) -> $error` translating plumbing failures.
#[macro_export]
macro_rules! impl_resource_client {
    ($client:ident, $entity:ty, $error:ty, $name:ident, $map:path) => {
        impl $client {
            pub fn new(inner: $crate::framework::ResourceClient<$entity>) -> Self {
                Self { inner }
            }
        }

        #[async_trait::async_trait]
        impl $crate::framework::ActorClient<$entity> for $client {
            type Error = $error;

            fn inner(&self) -> &$crate::framework::ResourceClient<$entity> {
                &self.inner
            }

            fn map_error(e: $crate::framework::FrameworkError) -> Self::Error {
                $map(e)
            }
        }

        paste::paste! {
            impl $client {
                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $name>](
                    &self,
                    id: <$entity as $crate::framework::ActorEntity>::Id,
                ) -> Result<Option<$entity>, $error> {
                    <Self as $crate::framework::ActorClient<$entity>>::get(self, id).await
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<delete_ $name>](
                    &self,
                    id: <$entity as $crate::framework::ActorEntity>::Id,
                ) -> Result<(), $error> {
                    <Self as $crate::framework::ActorClient<$entity>>::delete(self, id).await
                }
            }
        }
    };
}
