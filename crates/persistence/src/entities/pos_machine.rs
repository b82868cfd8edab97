//! POS machine entity (database row mapping).

use sqlx::FromRow;

use domain::models::PosMachine;

#[derive(Debug, Clone, FromRow)]
pub struct PosMachineEntity {
    pub id: i64,
    pub tenant_id: Option<i64>,
    pub serial_number: String,
    pub account_id: Option<i64>,
}

impl From<PosMachineEntity> for PosMachine {
    fn from(entity: PosMachineEntity) -> Self {
        Self {
            id: entity.id,
            tenant_id: entity.tenant_id,
            serial_number: entity.serial_number,
            account_id: entity.account_id,
        }
    }
}
