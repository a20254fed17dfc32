// ── Wire type conversions ──
//
// stockdeck-api speaks the service's DTO shapes; consumers see domain
// types. All translation lives here so neither side leaks into the other.

use stockdeck_api::types::{
    MovementCreateRequest, MovementDto, MovementUpdateRequest, ProfileUpdateRequest, StockDto,
    StockInput, UserDto,
};

use crate::model::{
    EntityId, Identity, Movement, MovementAmounts, MovementDraft, Product, ProductDraft,
    ProfileUpdate,
};

// ── Responses → domain ──────────────────────────────────────────────

impl From<StockDto> for Product {
    fn from(dto: StockDto) -> Self {
        Self {
            id: EntityId::from(dto.id),
            name: dto.name,
            quantity: dto.quantity,
            price: dto.price,
        }
    }
}

impl From<MovementDto> for Movement {
    fn from(dto: MovementDto) -> Self {
        Self {
            id: EntityId::from(dto.id),
            product_id: EntityId::from(dto.product_id),
            inbound: dto.inbound,
            outbound: dto.outbound,
            created_at: dto.created_at,
        }
    }
}

impl From<UserDto> for Identity {
    fn from(dto: UserDto) -> Self {
        Self {
            id: EntityId::from(dto.id),
            name: dto.name,
            email: dto.email,
            role: dto.role,
        }
    }
}

// ── Domain → request bodies ─────────────────────────────────────────

impl From<ProductDraft> for StockInput {
    fn from(draft: ProductDraft) -> Self {
        Self {
            name: draft.name,
            quantity: draft.quantity,
            price: draft.price,
        }
    }
}

impl From<MovementDraft> for MovementCreateRequest {
    fn from(draft: MovementDraft) -> Self {
        Self {
            product_id: draft.product_id.to_string(),
            inbound: draft.inbound,
            outbound: draft.outbound,
        }
    }
}

impl From<MovementAmounts> for MovementUpdateRequest {
    fn from(amounts: MovementAmounts) -> Self {
        Self {
            inbound: amounts.inbound,
            outbound: amounts.outbound,
        }
    }
}

impl From<ProfileUpdate> for ProfileUpdateRequest {
    fn from(update: ProfileUpdate) -> Self {
        Self {
            name: update.name,
            email: update.email,
        }
    }
}
