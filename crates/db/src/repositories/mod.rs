//! Repository layer: one zero-sized struct per resource, each method a
//! single statement against the pool.

pub mod adoption_request_repo;
pub mod animal_repo;
pub mod lookup_repo;
pub mod medical_history_repo;
pub mod organization_repo;
pub mod sighting_repo;
pub mod user_repo;

pub use adoption_request_repo::AdoptionRequestRepo;
pub use animal_repo::AnimalRepo;
pub use lookup_repo::LookupRepo;
pub use medical_history_repo::MedicalHistoryRepo;
pub use organization_repo::OrganizationRepo;
pub use sighting_repo::SightingRepo;
pub use user_repo::UserRepo;

use dogland_core::pagination::Page;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

/// Wrap a filtered CTE into a paged query that also reports the total.
///
/// `filtered` must be a CTE body selecting the row columns; `order_by` is
/// applied both inside the page and to the outer result. The anchor row
/// guarantees one result row even when the page is empty, so the total is
/// always available from a single round trip; [`rows_to_page`] drops the
/// all-NULL padding row.
pub(crate) fn paged_query(filtered: &str, order_by: &str, limit_bind: u32) -> String {
    let offset_bind = limit_bind + 1;
    format!(
        "WITH filtered AS ({filtered}) \
         SELECT (SELECT COUNT(*) FROM filtered) AS total_count, page.* \
         FROM (SELECT 1) AS anchor \
         LEFT JOIN ( \
             SELECT * FROM filtered ORDER BY {order_by} \
             LIMIT ${limit_bind} OFFSET ${offset_bind} \
         ) AS page ON TRUE \
         ORDER BY {outer}",
        outer = qualify_order_by(order_by, "page"),
    )
}

fn qualify_order_by(order_by: &str, alias: &str) -> String {
    order_by
        .split(',')
        .map(|part| format!("{alias}.{}", part.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convert rows produced by [`paged_query`] into a [`Page`].
pub(crate) fn rows_to_page<T>(rows: Vec<PgRow>) -> Result<Page<T>, sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow>,
{
    let total = match rows.first() {
        Some(row) => row.try_get::<i64, _>("total_count")?,
        None => 0,
    };

    let mut items = Vec::with_capacity(rows.len());
    for row in &rows {
        if row.try_get::<Option<i64>, _>("id")?.is_none() {
            continue;
        }
        items.push(T::from_row(row)?);
    }

    Ok(Page { items, total })
}
