// ── Inventory coordinator ──
//
// The main entry point for consumers. Owns the API client, the session,
// and the resource store, and enforces the consistency rule: after any
// successful mutation, every affected collection is marked stale and a
// refetch is started before the mutation call resolves. A failed
// mutation touches nothing.

use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::watch;
use tracing::{debug, warn};

use stockdeck_api::{ApiClient, TlsMode, TransportConfig};

use crate::config::{ServiceConfig, TlsVerification};
use crate::credentials::CredentialStore;
use crate::error::CoreError;
use crate::model::{
    EntityId, Identity, Movement, MovementAmounts, MovementDraft, Product, ProductDraft,
    ProfileUpdate,
};
use crate::session::Session;
use crate::store::{CollectionKey, ResourceStore};
use crate::summary::InventorySummary;

/// Snapshot handle for a cached collection.
pub type Snapshot<T> = Arc<Vec<Arc<T>>>;

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<InventoryInner>`. All snapshot slots are
/// mutated only through this type; consumers hold read-only references.
#[derive(Clone)]
pub struct Inventory {
    inner: Arc<InventoryInner>,
}

struct InventoryInner {
    api: Arc<ApiClient>,
    session: Session,
    store: ResourceStore,
}

impl Inventory {
    /// Build a coordinator for one service. Does not touch the network --
    /// call [`Session::restore`] (via [`session()`](Self::session)) or
    /// sign in to establish a session.
    pub fn new(
        config: ServiceConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let api = Arc::new(ApiClient::new(config.url, &transport)?);
        let session = Session::new(Arc::clone(&api), credentials);

        Ok(Self {
            inner: Arc::new(InventoryInner {
                api,
                session,
                store: ResourceStore::new(),
            }),
        })
    }

    /// The session manager.
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    // ── Read path ────────────────────────────────────────────────────

    /// The product collection.
    ///
    /// Returns the cached snapshot immediately when it is fresh;
    /// otherwise awaits a fetch, sharing any fetch already in flight.
    pub async fn products(&self) -> Result<Snapshot<Product>, CoreError> {
        let slot = &self.inner.store.products;
        if slot.is_loaded() && !slot.is_stale() {
            return Ok(slot.snapshot());
        }
        self.refresh_products().await
    }

    /// The movement collection. Same freshness contract as
    /// [`products`](Self::products).
    pub async fn movements(&self) -> Result<Snapshot<Movement>, CoreError> {
        let slot = &self.inner.store.movements;
        if slot.is_loaded() && !slot.is_stale() {
            return Ok(slot.snapshot());
        }
        self.refresh_movements().await
    }

    /// The last-fetched product snapshot, possibly stale, without
    /// touching the network.
    pub fn products_snapshot(&self) -> Snapshot<Product> {
        self.inner.store.products.snapshot()
    }

    /// The last-fetched movement snapshot, possibly stale.
    pub fn movements_snapshot(&self) -> Snapshot<Movement> {
        self.inner.store.movements.snapshot()
    }

    /// Subscribe to product snapshot changes.
    pub fn subscribe_products(&self) -> watch::Receiver<Snapshot<Product>> {
        self.inner.store.products.subscribe()
    }

    /// Subscribe to movement snapshot changes.
    pub fn subscribe_movements(&self) -> watch::Receiver<Snapshot<Movement>> {
        self.inner.store.movements.subscribe()
    }

    /// Force-fetch the product collection (coalesced).
    pub async fn refresh_products(&self) -> Result<Snapshot<Product>, CoreError> {
        let api = Arc::clone(&self.inner.api);
        Arc::clone(&self.inner.store.products)
            .refresh(async move {
                let dtos = api.list_stocks().await?;
                Ok(dtos.into_iter().map(Product::from).collect())
            })
            .await
    }

    /// Force-fetch the movement collection (coalesced).
    pub async fn refresh_movements(&self) -> Result<Snapshot<Movement>, CoreError> {
        let api = Arc::clone(&self.inner.api);
        Arc::clone(&self.inner.store.movements)
            .refresh(async move {
                let dtos = api.list_movements().await?;
                Ok(dtos.into_iter().map(Movement::from).collect())
            })
            .await
    }

    /// Fetch a single product directly from the service (no cache).
    pub async fn product(&self, id: &EntityId) -> Result<Product, CoreError> {
        let dto = self.inner.api.get_stock(&id.to_string()).await?;
        Ok(Product::from(dto))
    }

    /// Resolve a product id to its display name, falling back to the raw
    /// id when the product is no longer in the snapshot (deleted on the
    /// service, for instance). Lookups never fail hard.
    pub fn product_name(&self, id: &EntityId) -> String {
        self.inner
            .store
            .products
            .get(id)
            .map_or_else(|| id.to_string(), |p| p.name.clone())
    }

    // ── Product mutations ────────────────────────────────────────────

    /// Create a product. The service assigns the id.
    pub async fn create_product(&self, draft: ProductDraft) -> Result<Product, CoreError> {
        let created = self.inner.api.create_stock(&draft.into()).await?;
        self.after_mutation(CollectionKey::Products);
        Ok(Product::from(created))
    }

    /// Update a product's name, quantity, and price.
    pub async fn update_product(
        &self,
        id: &EntityId,
        draft: ProductDraft,
    ) -> Result<Product, CoreError> {
        let updated = self
            .inner
            .api
            .update_stock(&id.to_string(), &draft.into())
            .await?;
        self.after_mutation(CollectionKey::Products);
        Ok(Product::from(updated))
    }

    /// Delete a product.
    pub async fn delete_product(&self, id: &EntityId) -> Result<(), CoreError> {
        self.inner.api.delete_stock(&id.to_string()).await?;
        self.after_mutation(CollectionKey::Products);
        Ok(())
    }

    // ── Movement mutations ───────────────────────────────────────────

    /// Record a movement against an existing product.
    pub async fn create_movement(&self, draft: MovementDraft) -> Result<Movement, CoreError> {
        let created = self.inner.api.create_movement(&draft.into()).await?;
        self.after_mutation(CollectionKey::Movements);
        Ok(Movement::from(created))
    }

    /// Adjust a movement's amounts. The product reference is immutable.
    pub async fn update_movement(
        &self,
        id: &EntityId,
        amounts: MovementAmounts,
    ) -> Result<Movement, CoreError> {
        let updated = self
            .inner
            .api
            .update_movement(&id.to_string(), &amounts.into())
            .await?;
        self.after_mutation(CollectionKey::Movements);
        Ok(updated.into())
    }

    /// Delete a movement.
    pub async fn delete_movement(&self, id: &EntityId) -> Result<(), CoreError> {
        self.inner.api.delete_movement(&id.to_string()).await?;
        self.after_mutation(CollectionKey::Movements);
        Ok(())
    }

    // ── Account operations ───────────────────────────────────────────

    /// Update the signed-in user's profile; the session identity and the
    /// persisted profile follow the service's answer.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<Arc<Identity>, CoreError> {
        let identity = self.require_identity()?;
        let user = self
            .inner
            .api
            .update_profile(&identity.id.to_string(), &update.into())
            .await?;
        Ok(self.inner.session.update_identity(Identity::from(user)))
    }

    /// Change the signed-in user's password. Neither password outlives
    /// the request.
    pub async fn change_password(
        &self,
        old_password: &SecretString,
        new_password: &SecretString,
    ) -> Result<(), CoreError> {
        let identity = self.require_identity()?;
        self.inner
            .api
            .change_password(&identity.id.to_string(), old_password, new_password)
            .await?;
        Ok(())
    }

    /// Change the signed-in user's role tag.
    pub async fn change_role(&self, role: &str) -> Result<Arc<Identity>, CoreError> {
        let identity = self.require_identity()?;
        self.inner
            .api
            .change_role(&identity.id.to_string(), role)
            .await?;

        let mut updated = (*identity).clone();
        updated.role = Some(role.to_owned());
        Ok(self.inner.session.update_identity(updated))
    }

    /// Permanently delete the signed-in user's account, then tear the
    /// local session down (the remote session died with the account).
    pub async fn delete_account(&self) -> Result<(), CoreError> {
        let identity = self.require_identity()?;
        self.inner
            .api
            .delete_account(&identity.id.to_string())
            .await?;
        self.inner.session.forget();
        Ok(())
    }

    // ── Aggregates ───────────────────────────────────────────────────

    /// Summary figures over the current snapshots. Pure recomputation --
    /// absent snapshots contribute zeros.
    pub fn summary(&self) -> InventorySummary {
        InventorySummary::compute(&self.products_snapshot(), &self.movements_snapshot())
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn require_identity(&self) -> Result<Arc<Identity>, CoreError> {
        self.inner
            .session
            .identity()
            .ok_or_else(|| CoreError::AuthenticationFailed {
                message: "not signed in".into(),
            })
    }

    /// Invalidate-and-refetch after a successful mutation. Every affected
    /// key is marked stale first, then its refetch is spawned -- so the
    /// refetch is initiated before the mutation call returns, while the
    /// caller never waits on it.
    fn after_mutation(&self, key: CollectionKey) {
        for k in key.invalidates() {
            self.inner.store.mark_stale(*k);
        }
        for k in key.invalidates() {
            self.spawn_refresh(*k);
        }
    }

    fn spawn_refresh(&self, key: CollectionKey) {
        let this = self.clone();
        tokio::spawn(async move {
            let outcome = match key {
                CollectionKey::Products => this.refresh_products().await.map(|_| ()),
                CollectionKey::Movements => this.refresh_movements().await.map(|_| ()),
            };
            match outcome {
                Ok(()) => debug!(key = %key, "post-mutation refresh complete"),
                Err(e) => warn!(key = %key, error = %e, "post-mutation refresh failed"),
            }
        });
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Build a [`TransportConfig`] from the service configuration.
fn build_transport(config: &ServiceConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
