//! Map names and the UrTJumpers map metadata cache.

mod name;
pub use name::{InvalidMapName, MapName};

mod lookup;
pub use lookup::MapLookup;

mod cache;
pub use cache::{MapInfo, MapInfoCache};
