pub mod catalogue;
pub mod collage;
pub mod error;
pub mod layout;
pub mod selector;
pub mod social;
pub mod summary;
pub mod text;
pub mod thread;
pub mod venues;

pub use catalogue::{Movie, MovieTable, Ratings, Venue, VenueTable};
pub use error::AppError;
pub use layout::{PosterPlacement, RandomSource};
pub use selector::{Selection, Theme};
pub use social::{ComposeError, ComposedPost, LineFormat, SocialPostConfig};
pub use summary::MovieSummary;
pub use venues::DisplayItem;
