/// Cart failures that are not a plain "not found".
///
/// A missing or malformed cart is reported as `Ok(None)` by the use cases, so the only
/// error left is a store fault.
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("repository.persistence")]
    Repository(#[from] crate::domain::errors::RepositoryError),
}
