use crate::ports::{ArtifactStore, CatalogueStore};

/// Application context holding dependencies for command execution.
pub struct AppContext<C: CatalogueStore, A: ArtifactStore> {
    catalogue: C,
    artifacts: A,
}

impl<C: CatalogueStore, A: ArtifactStore> AppContext<C, A> {
    /// Create a new application context.
    pub fn new(catalogue: C, artifacts: A) -> Self {
        Self { catalogue, artifacts }
    }

    /// Get a reference to the catalogue store.
    pub fn catalogue(&self) -> &C {
        &self.catalogue
    }

    /// Get a reference to the artifact store.
    pub fn artifacts(&self) -> &A {
        &self.artifacts
    }
}
