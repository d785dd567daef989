use crate::domain::cart::model::Cart;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::value_objects::CartId;
use crate::domain::errors::RepositoryError;

/// Resolves a raw identifier to a stored cart id.
///
/// Malformed input is reported as `None` without querying the store.
pub(crate) async fn existing_cart_id(
    repository: &dyn CartRepository,
    raw: &str,
) -> Result<Option<CartId>, RepositoryError> {
    let Some(id) = CartId::parse(raw) else {
        return Ok(None);
    };
    if repository.exists(id).await? {
        Ok(Some(id))
    } else {
        Ok(None)
    }
}

/// Reads the cart header and joins its current item rows.
pub(crate) async fn load_cart(
    repository: &dyn CartRepository,
    id: CartId,
) -> Result<Option<Cart>, RepositoryError> {
    let Some(cart) = repository.find_by_id(id).await? else {
        return Ok(None);
    };
    let items = repository.find_items(id).await?;
    Ok(Some(cart.with_items(items)))
}
