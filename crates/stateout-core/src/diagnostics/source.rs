//! Lazily loaded source files for diagnostic snippets

use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

type Loader = Box<dyn Fn(&str) -> Option<Vec<u8>>>;

/// Looks up the contents of files that diagnostics point at.
///
/// Nothing is loaded until a diagnostic with a subject is rendered. Each file
/// is loaded at most once; misses are cached too.
pub struct SourceLookup {
    loader: Loader,
    cache: RefCell<HashMap<String, Option<Rc<[u8]>>>>,
}

impl SourceLookup {
    pub fn new(loader: impl Fn(&str) -> Option<Vec<u8>> + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// A lookup that never finds anything.
    #[must_use]
    pub fn none() -> Self {
        Self::new(|_| None)
    }

    /// A lookup that reads files from disk, relative to the working directory.
    #[must_use]
    pub fn filesystem() -> Self {
        Self::new(|filename| match std::fs::read(filename) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                tracing::debug!("No source for diagnostic snippet {filename}: {err}");
                None
            }
        })
    }

    /// A lookup over an in-memory set of files.
    #[must_use]
    pub fn from_sources(sources: HashMap<String, Vec<u8>>) -> Self {
        Self::new(move |filename| sources.get(filename).cloned())
    }

    /// Contents of `filename`, loading it on first request.
    pub fn source(&self, filename: &str) -> Option<Rc<[u8]>> {
        if let Some(cached) = self.cache.borrow().get(filename) {
            return cached.clone();
        }

        let loaded: Option<Rc<[u8]>> = (self.loader)(filename).map(Rc::from);
        self.cache
            .borrow_mut()
            .insert(filename.to_string(), loaded.clone());
        loaded
    }
}

impl Default for SourceLookup {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Debug for SourceLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceLookup")
            .field("cached", &self.cache.borrow().len())
            .finish_non_exhaustive()
    }
}
