use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use dashmap::DashMap;
use image::DynamicImage;

/// Decoded images keyed by source string, shared across theming passes.
///
/// Unbounded unless a capacity is given, in which case the oldest insertion
/// is evicted first.
#[derive(Debug, Default)]
pub struct ImageCache {
    images: DashMap<String, (u64, Arc<DynamicImage>)>,
    capacity: Option<usize>,
    clock: AtomicU64,
}

impl ImageCache {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            images: DashMap::new(),
            capacity,
            clock: AtomicU64::new(0),
        }
    }

    pub fn get(&self, source: &str) -> Option<Arc<DynamicImage>> {
        self.images.get(source).map(|entry| Arc::clone(&entry.1))
    }

    pub fn insert(&self, source: &str, image: Arc<DynamicImage>) {
        match self.capacity {
            Some(0) => return,
            Some(capacity) if !self.images.contains_key(source) => {
                while self.images.len() >= capacity {
                    let oldest = self
                        .images
                        .iter()
                        .min_by_key(|entry| entry.value().0)
                        .map(|entry| entry.key().clone());
                    match oldest {
                        Some(key) => {
                            self.images.remove(&key);
                        }
                        None => break,
                    }
                }
            }
            _ => {}
        }

        let stamp = self.clock.fetch_add(1, Ordering::Relaxed);
        self.images.insert(source.to_string(), (stamp, image));
    }

    pub fn remove(&self, source: &str) -> Option<Arc<DynamicImage>> {
        self.images.remove(source).map(|(_, (_, image))| image)
    }

    pub fn clear(&self) {
        self.images.clear();
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
