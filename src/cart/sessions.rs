//! Per-session cart access for the HTTP layer.
//!
//! Each client session gets its own storage scope (a directory under the
//! configured cart path), so every cart uses the same fixed storage key but
//! isolated data, like per-origin browser localStorage. Carts are reopened
//! from storage on every request and dropped after it: the process holds no
//! per-session state, so unauthenticated traffic with fresh session ids
//! cannot grow server memory.

use std::path::PathBuf;

use tokio::sync::Mutex;

use crate::errors::AppError;

use super::{CartStore, FileStorage};

/// Opens session carts on demand, serializing mutations per process.
pub struct CartSessions {
    root: PathBuf,
    lock: Mutex<()>,
}

impl CartSessions {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            lock: Mutex::new(()),
        }
    }

    /// Run a closure against the session's cart.
    ///
    /// The cart is restored from its persisted payload, mutated, and dropped;
    /// durability comes from the store persisting after every mutation. The
    /// lock serializes overlapping requests so two writers cannot interleave
    /// a read-modify-write on the same payload.
    pub async fn with_cart<T>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut CartStore<FileStorage>) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        validate_session_id(session_id)?;

        let _guard = self.lock.lock().await;
        let mut cart = CartStore::open(FileStorage::new(self.root.join(session_id)));
        f(&mut cart)
    }
}

/// Session ids become directory names; restrict them accordingly.
fn validate_session_id(session_id: &str) -> Result<(), AppError> {
    let valid = !session_id.is_empty()
        && session_id.len() <= 128
        && session_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(AppError::Validation("Invalid session id".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::STORAGE_KEY;
    use crate::models::{Product, Size};
    use tempfile::TempDir;

    fn sample_product() -> Product {
        Product {
            id: "p1".to_string(),
            name: "Sample Dress".to_string(),
            description: "Nice dress".to_string(),
            price: 40.0,
            gallery: None,
            images: None,
            image_url: "/products/sample.jpg".to_string(),
            category: "Dresses".to_string(),
            sizes: vec![Size::M],
            color: Some("Pink".to_string()),
            is_hot: false,
            is_latest: false,
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let dir = TempDir::new().unwrap();
        let sessions = CartSessions::new(dir.path().to_path_buf());

        sessions
            .with_cart("alice", |cart| cart.add_to_cart(sample_product(), Size::M))
            .await
            .unwrap();

        let bob_items = sessions
            .with_cart("bob", |cart| Ok(cart.items().len()))
            .await
            .unwrap();
        let alice_items = sessions
            .with_cart("alice", |cart| Ok(cart.items().len()))
            .await
            .unwrap();

        assert_eq!(bob_items, 0);
        assert_eq!(alice_items, 1);
    }

    #[tokio::test]
    async fn test_invalid_session_id_rejected() {
        let dir = TempDir::new().unwrap();
        let sessions = CartSessions::new(dir.path().to_path_buf());

        let result = sessions
            .with_cart("../escape", |cart| Ok(cart.items().len()))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_no_cart_state_retained_between_requests() {
        let dir = TempDir::new().unwrap();
        let sessions = CartSessions::new(dir.path().to_path_buf());

        sessions
            .with_cart("alice", |cart| cart.add_to_cart(sample_product(), Size::M))
            .await
            .unwrap();

        // Deleting the persisted payload behind the process's back must be
        // visible on the next request: the only copy lives on disk.
        let blob = dir
            .path()
            .join("alice")
            .join(format!("{}.json", STORAGE_KEY));
        std::fs::remove_file(blob).unwrap();

        let items = sessions
            .with_cart("alice", |cart| Ok(cart.items().len()))
            .await
            .unwrap();
        assert_eq!(items, 0);
    }

    #[tokio::test]
    async fn test_read_only_session_leaves_no_directory() {
        let dir = TempDir::new().unwrap();
        let sessions = CartSessions::new(dir.path().to_path_buf());

        let items = sessions
            .with_cart("ghost", |cart| Ok(cart.items().len()))
            .await
            .unwrap();

        assert_eq!(items, 0);
        assert!(!dir.path().join("ghost").exists());
    }
}
