//! Database repository for catalog and analytics operations.
//!
//! Uses prepared statements and transactions for data integrity.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    Product, Size, TrackVisitRequest, UpsertProductRequest, Visit, VisitSummary,
};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== PRODUCT OPERATIONS ====================

    /// List all products in insertion order.
    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, name, description, price, image_url, gallery, category,
                      sizes, color, is_hot, is_latest, created_at, updated_at
               FROM products ORDER BY rowid"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(product_from_row).collect())
    }

    /// Get a product by ID.
    pub async fn get_product(&self, id: &str) -> Result<Option<Product>, AppError> {
        let row = sqlx::query(
            r#"SELECT id, name, description, price, image_url, gallery, category,
                      sizes, color, is_hot, is_latest, created_at, updated_at
               FROM products WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(product_from_row))
    }

    /// Create or replace a product.
    ///
    /// The server assigns a UUID when the request carries no id. The gallery
    /// is normalized so its first element is the primary display image, and
    /// `created_at` survives updates to an existing row.
    pub async fn upsert_product(
        &self,
        request: &UpsertProductRequest,
    ) -> Result<Product, AppError> {
        let id = request
            .id
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let now = Utc::now().to_rfc3339();

        let gallery = normalize_gallery(request);
        let primary_image = gallery
            .first()
            .cloned()
            .unwrap_or_else(|| request.image_url.clone());

        let existing = self.get_product(&id).await?;
        let created_at = existing
            .as_ref()
            .and_then(|p| p.created_at.clone())
            .unwrap_or_else(|| now.clone());

        let gallery_json = serde_json::to_string(&gallery).unwrap_or_default();
        let sizes_json = serde_json::to_string(
            &request.sizes.iter().map(Size::as_str).collect::<Vec<_>>(),
        )
        .unwrap_or_default();

        sqlx::query(
            r#"INSERT INTO products (
                id, name, description, price, image_url, gallery, category,
                sizes, color, is_hot, is_latest, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                price = excluded.price,
                image_url = excluded.image_url,
                gallery = excluded.gallery,
                category = excluded.category,
                sizes = excluded.sizes,
                color = excluded.color,
                is_hot = excluded.is_hot,
                is_latest = excluded.is_latest,
                updated_at = excluded.updated_at"#,
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.price)
        .bind(&primary_image)
        .bind(&gallery_json)
        .bind(&request.category)
        .bind(&sizes_json)
        .bind(&request.color)
        .bind(request.is_hot as i32)
        .bind(request.is_latest as i32)
        .bind(&created_at)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id,
            name: request.name.clone(),
            description: request.description.clone(),
            price: request.price,
            gallery: Some(gallery.clone()),
            images: if gallery.is_empty() {
                None
            } else {
                Some(gallery)
            },
            image_url: primary_image,
            category: request.category.clone(),
            sizes: request.sizes.clone(),
            color: request.color.clone(),
            is_hot: request.is_hot,
            is_latest: request.is_latest,
            created_at: Some(created_at),
            updated_at: Some(now),
        })
    }

    /// Delete a set of products by id, returning the number of rows removed.
    pub async fn delete_products(&self, ids: &[String]) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut deleted = 0u64;

        for id in ids {
            let result = sqlx::query("DELETE FROM products WHERE id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            deleted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(deleted)
    }

    // ==================== VISIT OPERATIONS ====================

    /// Record a page visit.
    pub async fn record_visit(&self, request: &TrackVisitRequest) -> Result<Visit, AppError> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO visits (path, session_id, user_agent, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&request.path)
        .bind(&request.session_id)
        .bind(&request.user_agent)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Visit {
            id: result.last_insert_rowid(),
            path: request.path.clone(),
            session_id: request.session_id.clone(),
            user_agent: request.user_agent.clone(),
            created_at: now,
        })
    }

    /// List recorded visits, most recent first.
    pub async fn list_visits(&self, limit: i64) -> Result<Vec<Visit>, AppError> {
        let rows = sqlx::query(
            "SELECT id, path, session_id, user_agent, created_at FROM visits ORDER BY id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Visit {
                id: row.get("id"),
                path: row.get("path"),
                session_id: row.get("session_id"),
                user_agent: row.get("user_agent"),
                created_at: row.get("created_at"),
            })
            .collect())
    }

    /// Aggregate visit counts per path, busiest first.
    pub async fn visit_summary(&self) -> Result<Vec<VisitSummary>, AppError> {
        let rows = sqlx::query(
            "SELECT path, COUNT(*) AS visits FROM visits GROUP BY path ORDER BY visits DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| VisitSummary {
                path: row.get("path"),
                visits: row.get("visits"),
            })
            .collect())
    }
}

/// Gallery normalization from the admin editor contract: explicit image list
/// wins, otherwise the single primary image, otherwise empty.
fn normalize_gallery(request: &UpsertProductRequest) -> Vec<String> {
    match &request.images {
        Some(images) if !images.is_empty() => images.clone(),
        _ if !request.image_url.is_empty() => vec![request.image_url.clone()],
        _ => Vec::new(),
    }
}

// Helper functions for row conversion

fn product_from_row(row: &sqlx::sqlite::SqliteRow) -> Product {
    let is_hot: i32 = row.get("is_hot");
    let is_latest: i32 = row.get("is_latest");
    let gallery_str: Option<String> = row.get("gallery");
    let sizes_str: Option<String> = row.get("sizes");

    let gallery: Vec<String> = gallery_str
        .map(|s| parse_json_array(&s))
        .unwrap_or_default();
    let sizes: Vec<Size> = sizes_str
        .map(|s| parse_json_array(&s))
        .unwrap_or_default()
        .iter()
        .filter_map(|s| Size::from_str(s))
        .collect();

    let image_url: String = row.get("image_url");
    let images = if gallery.is_empty() {
        if image_url.is_empty() {
            None
        } else {
            Some(vec![image_url.clone()])
        }
    } else {
        Some(gallery.clone())
    };

    Product {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        price: row.get("price"),
        gallery: Some(gallery),
        images,
        image_url,
        category: row.get("category"),
        sizes,
        color: row.get("color"),
        is_hot: is_hot != 0,
        is_latest: is_latest != 0,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn parse_json_array(s: &str) -> Vec<String> {
    serde_json::from_str(s).unwrap_or_default()
}
