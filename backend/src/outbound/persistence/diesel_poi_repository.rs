//! PostgreSQL-backed `PoiRepository` implementation using Diesel ORM.
//!
//! A POI and its images are written in one transaction. Replacing a POI
//! replaces its image set; deleting it cascades to the images in the schema.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::{Nullable, Text};
use diesel_async::AsyncConnection as _;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{PoiRepository, RepositoryError};
use crate::domain::{Poi, PoiDraft, PoiId, PoiImage, PoiImageId, PoiLookupKey};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewPoiImageRow, PoiImageRow, PoiRow, PoiValues};
use super::pool::DbPool;
use super::schema::{poi_images, pois};

diesel::define_sql_function! {
    /// SQL `lower` over text.
    fn lower(value: Text) -> Text;
}

diesel::define_sql_function! {
    /// SQL `coalesce` of a nullable text column with a text fallback.
    fn coalesce(value: Nullable<Text>, fallback: Text) -> Text;
}

/// Diesel-backed implementation of the [`PoiRepository`] port.
#[derive(Clone)]
pub struct DieselPoiRepository {
    pool: DbPool,
}

impl DieselPoiRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_image(row: PoiImageRow) -> PoiImage {
    PoiImage {
        id: PoiImageId::new(row.id),
        image_url: row.image_url,
        embedding: row.embedding,
    }
}

fn row_to_poi(row: PoiRow, images: Vec<PoiImage>) -> Poi {
    Poi {
        id: PoiId::new(row.id),
        name: row.name,
        description: row.description,
        location: row.location,
        image_url: row.image_url,
        images,
    }
}

fn values(draft: &PoiDraft) -> PoiValues<'_> {
    PoiValues {
        name: draft.name(),
        description: draft.description(),
        location: draft.location(),
        image_url: draft.image_url(),
    }
}

async fn load_images(
    conn: &mut AsyncPgConnection,
    poi_ids: Vec<i64>,
) -> QueryResult<HashMap<i64, Vec<PoiImage>>> {
    let rows: Vec<PoiImageRow> = poi_images::table
        .filter(poi_images::poi_id.eq_any(poi_ids))
        .order(poi_images::id.asc())
        .select(PoiImageRow::as_select())
        .load(conn)
        .await?;

    let mut grouped: HashMap<i64, Vec<PoiImage>> = HashMap::new();
    for row in rows {
        grouped.entry(row.poi_id).or_default().push(row_to_image(row));
    }
    Ok(grouped)
}

async fn attach_images(conn: &mut AsyncPgConnection, row: PoiRow) -> QueryResult<Poi> {
    let mut images = load_images(conn, vec![row.id]).await?;
    let own = images.remove(&row.id).unwrap_or_default();
    Ok(row_to_poi(row, own))
}

async fn insert_images(
    conn: &mut AsyncPgConnection,
    poi_id: i64,
    draft: &PoiDraft,
) -> QueryResult<Vec<PoiImage>> {
    if draft.images().is_empty() {
        return Ok(Vec::new());
    }
    let rows: Vec<NewPoiImageRow<'_>> = draft
        .images()
        .iter()
        .map(|image| NewPoiImageRow {
            poi_id,
            image_url: image.image_url.as_deref(),
            embedding: image.embedding.as_deref(),
        })
        .collect();
    let stored: Vec<PoiImageRow> = diesel::insert_into(poi_images::table)
        .values(&rows)
        .returning(PoiImageRow::as_returning())
        .get_results(conn)
        .await?;
    Ok(stored.into_iter().map(row_to_image).collect())
}

#[async_trait]
impl PoiRepository for DieselPoiRepository {
    async fn list(&self) -> Result<Vec<Poi>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PoiRow> = pois::table
            .order(pois::id.asc())
            .select(PoiRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let ids = rows.iter().map(|row| row.id).collect();
        let mut images = load_images(&mut conn, ids)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let own = images.remove(&row.id).unwrap_or_default();
                row_to_poi(row, own)
            })
            .collect())
    }

    async fn find_by_id(&self, id: PoiId) -> Result<Option<Poi>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PoiRow> = pois::table
            .find(id.get())
            .select(PoiRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let Some(row) = row else {
            return Ok(None);
        };

        attach_images(&mut conn, row)
            .await
            .map(Some)
            .map_err(map_diesel_error)
    }

    async fn find_by_name_and_location(
        &self,
        key: &PoiLookupKey,
    ) -> Result<Option<Poi>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PoiRow> = pois::table
            .filter(lower(pois::name).eq(lower(key.input_name())))
            .filter(lower(coalesce(pois::location, "")).eq(lower(key.input_location())))
            .select(PoiRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let Some(row) = row else {
            return Ok(None);
        };

        attach_images(&mut conn, row)
            .await
            .map(Some)
            .map_err(map_diesel_error)
    }

    async fn insert(&self, draft: &PoiDraft) -> Result<Poi, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                let row: PoiRow = diesel::insert_into(pois::table)
                    .values(values(draft))
                    .returning(PoiRow::as_returning())
                    .get_result(conn)
                    .await?;
                let images = insert_images(conn, row.id, draft).await?;
                Ok(row_to_poi(row, images))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn update(&self, id: PoiId, draft: &PoiDraft) -> Result<Option<Poi>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                let row: Option<PoiRow> = diesel::update(pois::table.find(id.get()))
                    .set(values(draft))
                    .returning(PoiRow::as_returning())
                    .get_result(conn)
                    .await
                    .optional()?;
                let Some(row) = row else {
                    return Ok(None);
                };
                diesel::delete(poi_images::table.filter(poi_images::poi_id.eq(row.id)))
                    .execute(conn)
                    .await?;
                let images = insert_images(conn, row.id, draft).await?;
                Ok(Some(row_to_poi(row, images)))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn delete(&self, id: PoiId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(pois::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
