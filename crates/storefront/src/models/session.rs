//! Session-related types.
//!
//! The visitor's cart and drawer visibility live in the session record.
//! Handlers load them, run the reducer, and write the result back.

use tower_sessions::Session;

use fakestore_core::{Cart, DrawerState};

/// Session keys for cart data.
pub mod keys {
    /// Key for the visitor's cart line items.
    pub const CART: &str = "cart";

    /// Key for the cart drawer visibility flag.
    pub const CART_DRAWER: &str = "cart_drawer";
}

/// Load the visitor's cart, or an empty one for a fresh session.
///
/// # Errors
///
/// Returns an error if the session store fails or the stored value can't be
/// decoded.
pub async fn load_cart(session: &Session) -> Result<Cart, tower_sessions::session::Error> {
    Ok(session.get::<Cart>(keys::CART).await?.unwrap_or_default())
}

/// Replace the visitor's cart.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn store_cart(
    session: &Session,
    cart: &Cart,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CART, cart).await
}

/// Load the drawer state, closed for a fresh session.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn load_drawer(session: &Session) -> Result<DrawerState, tower_sessions::session::Error> {
    Ok(session
        .get::<DrawerState>(keys::CART_DRAWER)
        .await?
        .unwrap_or_default())
}

/// Replace the drawer state.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn store_drawer(
    session: &Session,
    drawer: DrawerState,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CART_DRAWER, drawer).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use fakestore_core::{Price, Product, ProductId};
    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_fresh_session_has_empty_cart_and_closed_drawer() {
        let session = session();
        assert!(load_cart(&session).await.unwrap().is_empty());
        assert_eq!(load_drawer(&session).await.unwrap(), DrawerState::Closed);
    }

    #[tokio::test]
    async fn test_cart_round_trips_through_session() {
        let session = session();
        let product = Product {
            id: ProductId::new(3),
            category: "men's clothing".to_string(),
            description: "Cotton jacket".to_string(),
            image: "https://img.example/3.jpg".to_string(),
            price: Price::from_cents(5599),
            title: "Mens Cotton Jacket".to_string(),
        };
        let cart = Cart::new().add(&product).add(&product);

        store_cart(&session, &cart).await.unwrap();
        store_drawer(&session, DrawerState::Open).await.unwrap();

        assert_eq!(load_cart(&session).await.unwrap(), cart);
        assert_eq!(load_drawer(&session).await.unwrap(), DrawerState::Open);
    }
}
