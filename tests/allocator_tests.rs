//! Key allocator tests
//!
//! Covers the shape of generated keys and, more importantly, concurrent
//! claims racing for the same candidates.

use std::collections::HashSet;
use std::sync::Arc;

use flatlinker::errors::FlatlinkerError;
use flatlinker::services::{DEFAULT_KEY_LENGTH, KeyAllocator};
use flatlinker::storage::{FileStore, KeyValueStore, MemoryStore};
use flatlinker::utils::{RandomSource, ThreadRandom, is_alphabet_code};
use tempfile::TempDir;

/// Always index 0: every candidate is "aaaa", "aaaaa", ...
struct Zero;

impl RandomSource for Zero {
    fn index(&self, _upper: usize) -> usize {
        0
    }
}

/// Only 'a' or 'b': a tiny key space that fills up quickly
struct Binary;

impl RandomSource for Binary {
    fn index(&self, _upper: usize) -> usize {
        rand::random_range(0..2)
    }
}

fn binary_keys(length: usize) -> Vec<String> {
    (0..1usize << length)
        .map(|bits| {
            (0..length)
                .map(|i| if bits & (1 << i) == 0 { 'a' } else { 'b' })
                .collect()
        })
        .collect()
}

#[tokio::test]
async fn test_allocated_keys_are_fresh_alphanumeric() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir.path()));
    let allocator = KeyAllocator::new(store.clone(), Arc::new(ThreadRandom));

    for _ in 0..50 {
        let key = allocator.allocate().await.unwrap();
        assert!(key.len() >= DEFAULT_KEY_LENGTH);
        assert!(is_alphabet_code(&key), "unexpected key {}", key);
        assert!(!store.exists(&key).await.unwrap());

        let claimed = allocator.claim("https://example.com").await.unwrap();
        assert_eq!(claimed.len(), DEFAULT_KEY_LENGTH);
        assert_eq!(store.get(&claimed).await.unwrap(), "https://example.com");
    }
}

#[tokio::test]
async fn test_allocate_alone_does_not_reserve() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let allocator = KeyAllocator::new(store.clone(), Arc::new(Zero));

    // 两次检查看到的都是空闲的同一个 key
    let first = allocator.allocate().await.unwrap();
    let second = allocator.allocate().await.unwrap();
    assert_eq!(first, "aaaa");
    assert_eq!(first, second);

    store.create(&first, "https://first.example.com").await.unwrap();
    let err = store
        .create(&second, "https://second.example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, FlatlinkerError::AlreadyExists(_)));
    assert_eq!(store.get("aaaa").await.unwrap(), "https://first.example.com");
}

#[tokio::test]
async fn test_claim_skips_taken_keys() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    store.put("aaaa", "https://taken.example.com").await.unwrap();

    let allocator = KeyAllocator::new(store.clone(), Arc::new(Zero));
    let key = allocator.claim("https://new.example.com").await.unwrap();

    assert_eq!(key, "aaaaa");
    assert_eq!(store.get("aaaa").await.unwrap(), "https://taken.example.com");
    assert_eq!(store.get("aaaaa").await.unwrap(), "https://new.example.com");
}

async fn race_claims(store: Arc<dyn KeyValueStore>, random: Arc<dyn RandomSource>, n: usize) {
    let allocator = Arc::new(KeyAllocator::new(store.clone(), random));

    let mut handles = Vec::with_capacity(n);
    for i in 0..n {
        let allocator = allocator.clone();
        handles.push(tokio::spawn(async move {
            let value = format!("https://example.com/{}", i);
            let key = allocator.claim(&value).await.unwrap();
            (key, value)
        }));
    }

    let mut keys = HashSet::new();
    for handle in handles {
        let (key, value) = handle.await.unwrap();
        assert!(keys.insert(key.clone()), "key {} handed out twice", key);
        assert_eq!(store.get(&key).await.unwrap(), value);
    }
    assert_eq!(keys.len(), n);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_claims_on_same_candidates_file_store() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir.path()));
    race_claims(store, Arc::new(Zero), 8).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_claims_on_same_candidates_memory_store() {
    race_claims(Arc::new(MemoryStore::new()), Arc::new(Zero), 8).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_claims_in_near_full_key_space() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir.path()));

    // 预先占满长度 4 的 {a,b} 空间，只留一个空位
    let seeded: Vec<String> = binary_keys(4)
        .into_iter()
        .filter(|k| k != "abba")
        .collect();
    for key in &seeded {
        store.put(key, &format!("https://seed.example.com/{}", key)).await.unwrap();
    }

    race_claims(store.clone(), Arc::new(Binary), 6).await;

    for key in &seeded {
        assert_eq!(
            store.get(key).await.unwrap(),
            format!("https://seed.example.com/{}", key),
            "seeded entry {} was overwritten",
            key
        );
    }
}
