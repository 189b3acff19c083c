mod artifact_store;
mod catalogue_store;

pub use artifact_store::ArtifactStore;
pub use catalogue_store::CatalogueStore;
