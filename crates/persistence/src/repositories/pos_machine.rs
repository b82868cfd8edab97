//! POS machine repository for database operations.

use domain::models::{NewPosMachine, PosMachine};

use crate::db::ConnectionManager;
use crate::entities::PosMachineEntity;
use crate::error::PersistenceError;
use crate::query::{Filters, Insert, Scope, Select};
use crate::schema::POS_MACHINES;

/// Repository for payment terminal registrations.
#[derive(Clone)]
pub struct PosMachineRepository {
    db: ConnectionManager,
}

impl PosMachineRepository {
    /// Creates a new PosMachineRepository using the given connection manager.
    pub fn new(db: ConnectionManager) -> Self {
        Self { db }
    }

    pub async fn create(&self, machine: NewPosMachine) -> Result<PosMachine, PersistenceError> {
        let mut conn = self.db.acquire().await?;
        let statement = Insert::new(conn.dialect(), &POS_MACHINES)
            .value("tenant_id", machine.tenant_id)
            .value("serial_number", machine.serial_number)
            .value("account_id", machine.account_id)
            .build("add_pos_machine")?;
        let entity: PosMachineEntity = conn.fetch_one(&statement).await?;
        Ok(entity.into())
    }

    pub async fn list(
        &self,
        tenant: Scope<i64>,
        filters: &Filters,
    ) -> Result<Vec<PosMachine>, PersistenceError> {
        let mut conn = self.db.acquire().await?;
        let statement = Select::new(conn.dialect(), &POS_MACHINES)
            .scope("tenant_id", tenant)
            .filters(filters)
            .order_by("id")
            .build("get_pos_machines")?;
        let entities: Vec<PosMachineEntity> = conn.fetch_all(&statement).await?;
        Ok(entities.into_iter().map(Into::into).collect())
    }
}
