mod artifact_filesystem;
mod catalogue_filesystem;
mod rng;

pub use artifact_filesystem::FilesystemArtifactStore;
#[cfg(test)]
pub use artifact_filesystem::PlainArtifactStore;
pub use catalogue_filesystem::JsonCatalogueStore;
pub use rng::{SeededRandom, ThreadRandom};
