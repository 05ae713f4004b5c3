#![allow(dead_code)]
use async_trait::async_trait;
use review_catalog::{EntityRef, Review, ReviewStore, UpstreamError};
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Barrier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Fetch(i64),
    Insert,
    Replace(i64),
    Delete(i64),
    User(i64),
    Film(i64),
}

/// In-memory stand-in for servicedb that records every call it receives
#[derive(Default)]
pub struct InMemoryStore {
    reviews: Mutex<BTreeMap<i64, Review>>,
    users: Mutex<HashSet<i64>>,
    films: Mutex<HashSet<i64>>,
    calls: Mutex<Vec<Call>>,
    next_id: AtomicUsize,
    failing: Mutex<bool>,
    fetch_gate: Mutex<Option<(Arc<Barrier>, usize)>>,
    gated_fetches: AtomicUsize,
    replace_misses: Mutex<bool>,
    vanish_after_replace: Mutex<bool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicUsize::new(1),
            ..Default::default()
        }
    }

    pub fn with_user(self, id: i64) -> Self {
        self.users.lock().unwrap().insert(id);
        self
    }

    pub fn with_film(self, id: i64) -> Self {
        self.films.lock().unwrap().insert(id);
        self
    }

    pub fn with_review(self, review: Review) -> Self {
        let id = review.id.expect("seeded review needs an id");
        self.reviews.lock().unwrap().insert(id, review);
        self
    }

    /// Every call fails with a 503 from now on
    pub fn fail_everything(&self) {
        *self.failing.lock().unwrap() = true;
    }

    /// Replacing answers as if the review no longer existed
    pub fn miss_on_replace(&self) {
        *self.replace_misses.lock().unwrap() = true;
    }

    /// A replaced review is dropped right after the write, before any re-read
    pub fn drop_after_replace(&self) {
        *self.vanish_after_replace.lock().unwrap() = true;
    }

    /// The first `count` fetches wait on `barrier` after reading
    pub fn gate_fetches(&self, barrier: Arc<Barrier>, count: usize) {
        *self.fetch_gate.lock().unwrap() = Some((barrier, count));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn stored(&self, id: i64) -> Option<Review> {
        self.reviews.lock().unwrap().get(&id).cloned()
    }

    fn record(&self, call: Call) -> Result<(), UpstreamError> {
        self.calls.lock().unwrap().push(call);
        if *self.failing.lock().unwrap() {
            return Err(UpstreamError::Status {
                method: "GET",
                path: "/api".to_string(),
                status: 503,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ReviewStore for InMemoryStore {
    async fn list_reviews(&self) -> Result<Vec<Review>, UpstreamError> {
        self.record(Call::List)?;
        Ok(self.reviews.lock().unwrap().values().cloned().collect())
    }

    async fn fetch_review(&self, id: i64) -> Result<Option<Review>, UpstreamError> {
        self.record(Call::Fetch(id))?;
        let review = self.stored(id);

        let gate = self.fetch_gate.lock().unwrap().clone();
        if let Some((barrier, count)) = gate {
            if self.gated_fetches.fetch_add(1, Ordering::SeqCst) < count {
                barrier.wait().await;
            }
        }
        Ok(review)
    }

    async fn insert_review(&self, review: &Review) -> Result<Review, UpstreamError> {
        self.record(Call::Insert)?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 100;
        let created = Review {
            id: Some(id),
            ..review.clone()
        };
        self.reviews.lock().unwrap().insert(id, created.clone());
        Ok(created)
    }

    async fn replace_review(&self, id: i64, review: &Review) -> Result<bool, UpstreamError> {
        self.record(Call::Replace(id))?;
        if *self.replace_misses.lock().unwrap() {
            return Ok(false);
        }
        let stored = Review {
            id: Some(id),
            ..review.clone()
        };
        let mut reviews = self.reviews.lock().unwrap();
        reviews.insert(id, stored);
        if *self.vanish_after_replace.lock().unwrap() {
            reviews.remove(&id);
        }
        Ok(true)
    }

    async fn delete_review(&self, id: i64) -> Result<bool, UpstreamError> {
        self.record(Call::Delete(id))?;
        Ok(self.reviews.lock().unwrap().remove(&id).is_some())
    }

    async fn user_exists(&self, id: i64) -> Result<bool, UpstreamError> {
        self.record(Call::User(id))?;
        Ok(self.users.lock().unwrap().contains(&id))
    }

    async fn film_exists(&self, id: i64) -> Result<bool, UpstreamError> {
        self.record(Call::Film(id))?;
        Ok(self.films.lock().unwrap().contains(&id))
    }
}

pub fn new_review(rating: i32, text: &str, user: i64, film: i64) -> Review {
    Review {
        rating,
        review_text: Some(text.to_string()),
        user: Some(EntityRef::new(user)),
        film: Some(EntityRef::new(film)),
        ..Default::default()
    }
}

pub fn stored_review(id: i64, likes: i32, dislikes: i32) -> Review {
    Review {
        id: Some(id),
        number_of_likes: likes,
        number_of_dislikes: dislikes,
        publication_date: chrono::NaiveDate::from_ymd_opt(2024, 5, 1),
        ..new_review(7, "Solid", 1, 2)
    }
}
