//! The generic actor on its own, with a minimal entity.

use async_trait::async_trait;
use fuseloja::framework::{ActorEntity, FrameworkError, ResourceActor};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CouponId(u32);

impl From<u32> for CouponId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for CouponId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "coupon_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
enum CouponError {
    #[error("code is required")]
    MissingCode,
    #[error("coupon exhausted")]
    Exhausted,
}

#[derive(Debug, Clone, PartialEq)]
struct Coupon {
    id: CouponId,
    code: String,
    uses_left: u32,
}

#[derive(Debug)]
struct Redeem;

/// Counts discarded creates.
type Discards = Arc<AtomicU32>;

#[async_trait]
impl ActorEntity for Coupon {
    type Id = CouponId;
    type Create = (String, u32);
    type Update = u32;
    type Action = Redeem;
    type ActionResult = u32;
    type Context = Discards;
    type Error = CouponError;

    fn from_create_params(
        id: CouponId,
        (code, uses_left): (String, u32),
    ) -> Result<Self, CouponError> {
        if code.is_empty() {
            return Err(CouponError::MissingCode);
        }
        Ok(Self { id, code, uses_left })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.code.clone())
    }

    async fn on_discard(&mut self, discards: &Discards) -> Result<(), CouponError> {
        discards.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn on_update(&mut self, uses_left: u32, _: &Discards) -> Result<(), CouponError> {
        self.uses_left = uses_left;
        Ok(())
    }

    async fn handle_action(&mut self, _: Redeem, _: &Discards) -> Result<u32, CouponError> {
        self.uses_left = self.uses_left.checked_sub(1).ok_or(CouponError::Exhausted)?;
        Ok(self.uses_left)
    }
}

#[tokio::test]
async fn crud_and_actions() {
    let (actor, client) = ResourceActor::<Coupon>::new(4);
    let handle = tokio::spawn(actor.run(Discards::default()));

    let id = client.create(("BEMVINDO".into(), 1)).await.unwrap();
    assert_eq!(id, CouponId(1));
    assert_eq!(client.perform_action(id, Redeem).await.unwrap(), 0);

    let err = client.perform_action(id, Redeem).await.unwrap_err();
    assert_eq!(err.downcast_entity::<CouponError>().unwrap(), CouponError::Exhausted);

    let updated = client.update(id, 5).await.unwrap();
    assert_eq!(updated.uses_left, 5);
    assert_eq!(client.list().await.unwrap().len(), 1);

    client.delete(id).await.unwrap();
    assert_eq!(client.get(id).await.unwrap(), None);
    assert!(matches!(
        client.perform_action(id, Redeem).await,
        Err(FrameworkError::NotFound(ref missing)) if missing == "coupon_1"
    ));

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn unique_key_collision_is_discarded() {
    let discards = Discards::default();
    let (actor, client) = ResourceActor::<Coupon>::new(4);
    let handle = tokio::spawn(actor.run(discards.clone()));

    client.create(("FRETEGRATIS".into(), 3)).await.unwrap();
    let err = client.create(("FRETEGRATIS".into(), 9)).await.unwrap_err();

    assert!(matches!(err, FrameworkError::Conflict(ref key) if key == "FRETEGRATIS"));
    assert_eq!(discards.load(Ordering::SeqCst), 1);
    // the rejected create did not consume an id
    assert_eq!(client.create(("OUTRO".into(), 1)).await.unwrap(), CouponId(2));
    assert_eq!(client.list().await.unwrap().len(), 2);

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn invalid_payload_never_reaches_the_store() {
    let (actor, client) = ResourceActor::<Coupon>::new(4);
    let handle = tokio::spawn(actor.run(Discards::default()));

    let err = client.create((String::new(), 1)).await.unwrap_err();
    assert_eq!(err.downcast_entity::<CouponError>().unwrap(), CouponError::MissingCode);
    assert!(client.list().await.unwrap().is_empty());

    drop(client);
    handle.await.unwrap();
}
