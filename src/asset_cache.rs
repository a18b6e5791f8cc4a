// THEORY:
// The `asset_cache` module gives the scanner's front-end assets a degree of
// offline resilience. A fixed manifest of paths is loaded once into an
// in-memory cache under a static cache name; later fetches serve the cached
// bytes when present and fall through to the live loader otherwise. There is
// deliberately no invalidation or versioning beyond the cache name itself —
// shipping a new asset set means shipping a new name.
//
// Precaching is best-effort: an asset that fails to load is logged as a
// warning and skipped, and the application continues without offline support
// for it. A fetch miss with a failing loader is the caller's error to surface.

use log::{info, warn};
use std::collections::HashMap;
use std::io;

/// The static cache identity. Bump when the asset set changes.
pub const CACHE_NAME: &str = "crimson-scanner-v1";

/// The fixed list of assets precached for offline use.
pub const PRECACHE_MANIFEST: &[&str] = &[
    "index.html",
    "scanner.js",
    "style.css",
    "manifest.json",
    "icons/marker.png",
];

/// Resolves an asset path to its bytes from the live backing store.
pub trait AssetLoader {
    fn load(&self, path: &str) -> io::Result<Vec<u8>>;
}

/// An in-memory cache-then-live asset store.
#[derive(Debug, Default)]
pub struct AssetCache {
    entries: HashMap<String, Vec<u8>>,
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every manifest entry into the cache. Failures degrade to
    /// online-only for that asset; they never abort the application.
    pub fn precache(&mut self, loader: &impl AssetLoader) {
        for path in PRECACHE_MANIFEST {
            match loader.load(path) {
                Ok(bytes) => {
                    self.entries.insert((*path).to_string(), bytes);
                }
                Err(load_error) => {
                    warn!("precache of {path} failed ({load_error}); continuing without it");
                }
            }
        }
        info!(
            "{}: precached {} of {} assets",
            CACHE_NAME,
            self.entries.len(),
            PRECACHE_MANIFEST.len()
        );
    }

    /// Serves the cached bytes when present, otherwise attempts the live
    /// loader. Never writes back on a miss.
    pub fn fetch(&self, path: &str, loader: &impl AssetLoader) -> io::Result<Vec<u8>> {
        if let Some(bytes) = self.entries.get(path) {
            return Ok(bytes.clone());
        }
        loader.load(path)
    }

    pub fn is_cached(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn cached_count(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A loader over a fixed map, counting how often it is hit.
    struct MapLoader {
        assets: HashMap<String, Vec<u8>>,
        hits: std::cell::Cell<usize>,
    }

    impl MapLoader {
        fn with_assets(paths: &[&str]) -> Self {
            let assets = paths
                .iter()
                .map(|path| ((*path).to_string(), format!("contents of {path}").into_bytes()))
                .collect();
            Self {
                assets,
                hits: std::cell::Cell::new(0),
            }
        }
    }

    impl AssetLoader for MapLoader {
        fn load(&self, path: &str) -> io::Result<Vec<u8>> {
            self.hits.set(self.hits.get() + 1);
            self.assets
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.to_string()))
        }
    }

    #[test]
    fn precache_fills_the_cache_from_the_manifest() {
        let loader = MapLoader::with_assets(PRECACHE_MANIFEST);
        let mut cache = AssetCache::new();
        cache.precache(&loader);

        assert_eq!(cache.cached_count(), PRECACHE_MANIFEST.len());
        assert!(cache.is_cached("index.html"));
    }

    #[test]
    fn precache_failures_are_soft() {
        // Only one manifest asset actually exists.
        let loader = MapLoader::with_assets(&["index.html"]);
        let mut cache = AssetCache::new();
        cache.precache(&loader);

        assert_eq!(cache.cached_count(), 1);
        assert!(cache.is_cached("index.html"));
        assert!(!cache.is_cached("scanner.js"));
    }

    #[test]
    fn fetch_serves_cache_before_the_loader() {
        let loader = MapLoader::with_assets(PRECACHE_MANIFEST);
        let mut cache = AssetCache::new();
        cache.precache(&loader);
        let hits_after_precache = loader.hits.get();

        let bytes = cache.fetch("index.html", &loader).unwrap();
        assert_eq!(bytes, b"contents of index.html");
        assert_eq!(loader.hits.get(), hits_after_precache);
    }

    #[test]
    fn fetch_falls_through_on_a_miss() {
        let loader = MapLoader::with_assets(&["uncached.js"]);
        let cache = AssetCache::new();

        let bytes = cache.fetch("uncached.js", &loader).unwrap();
        assert_eq!(bytes, b"contents of uncached.js");
        // Misses are not written back.
        assert!(!cache.is_cached("uncached.js"));
    }

    #[test]
    fn fetch_miss_with_failing_loader_is_an_error() {
        let loader = MapLoader::with_assets(&[]);
        let cache = AssetCache::new();
        assert!(cache.fetch("absent.css", &loader).is_err());
    }
}
