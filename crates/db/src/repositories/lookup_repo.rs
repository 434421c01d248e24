//! Read-only access to the seeded lookup catalogs.

use dogland_core::types::LookupId;
use sqlx::PgPool;

use crate::models::lookup::{LookupEntry, LookupKind};

pub struct LookupRepo;

impl LookupRepo {
    /// List every entry of a catalog ordered by id.
    ///
    /// `species_id` narrows breeds to one species and is ignored for other
    /// catalogs.
    pub async fn list(
        pool: &PgPool,
        kind: LookupKind,
        species_id: Option<LookupId>,
    ) -> Result<Vec<LookupEntry>, sqlx::Error> {
        match kind {
            LookupKind::Breeds => {
                sqlx::query_as::<_, LookupEntry>(
                    "SELECT id, name, species_id FROM breeds
                     WHERE ($1::SMALLINT IS NULL OR species_id = $1)
                     ORDER BY id",
                )
                .bind(species_id)
                .fetch_all(pool)
                .await
            }
            _ => {
                let query = format!("SELECT id, name FROM {} ORDER BY id", kind.table());
                sqlx::query_as::<_, LookupEntry>(&query)
                    .fetch_all(pool)
                    .await
            }
        }
    }
}
