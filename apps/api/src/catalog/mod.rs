//! Internship catalog — a locally curated list of postings, fully
//! independent of the analysis pipeline. Never reads or writes analysis
//! state; the only thing the two share is the posting shape.

pub mod handlers;

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::analysis::{Internship, InternshipType};
use crate::store::{KvStore, CATALOG_KEY};

pub struct CatalogStore {
    entries: RwLock<Vec<Internship>>,
    kv: Arc<dyn KvStore>,
}

impl CatalogStore {
    /// Loads the catalog, seeding the built-in postings the first time the
    /// key is ever touched.
    pub async fn load(kv: Arc<dyn KvStore>) -> Result<Self> {
        let entries = match kv.get(CATALOG_KEY).await? {
            Some(raw) => {
                serde_json::from_str(&raw).context("persisted catalog is unreadable")?
            }
            None => {
                let seeded = default_catalog();
                let raw = serde_json::to_string(&seeded)
                    .context("failed to serialize catalog seed")?;
                kv.put(CATALOG_KEY, &raw).await?;
                seeded
            }
        };
        Ok(Self {
            entries: RwLock::new(entries),
            kv,
        })
    }

    /// Returns all postings in storage order.
    pub async fn list(&self) -> Vec<Internship> {
        self.entries.read().await.clone()
    }

    /// Replaces the entry with a matching id in place, or appends the
    /// posting under a freshly generated id. Returns the stored entry.
    pub async fn save(&self, internship: Internship) -> Result<Internship> {
        let mut entries = self.entries.write().await;
        let stored = match entries.iter().position(|e| e.id == internship.id) {
            Some(index) => {
                entries[index] = internship;
                entries[index].clone()
            }
            None => {
                let mut fresh = internship;
                fresh.id = next_id(&entries);
                entries.push(fresh.clone());
                fresh
            }
        };
        self.persist(&entries).await?;
        Ok(stored)
    }

    /// Removes the matching entry; a miss is a no-op.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.retain(|e| e.id != id);
        self.persist(&entries).await
    }

    async fn persist(&self, entries: &[Internship]) -> Result<()> {
        let raw = serde_json::to_string(entries).context("failed to serialize catalog")?;
        self.kv.put(CATALOG_KEY, &raw).await
    }
}

/// Millisecond-timestamp id, bumped past any live collision. Adequate for a
/// single operator; not a distributed id scheme.
fn next_id(entries: &[Internship]) -> String {
    let mut candidate = Utc::now().timestamp_millis();
    while entries.iter().any(|e| e.id == candidate.to_string()) {
        candidate += 1;
    }
    candidate.to_string()
}

/// The two built-in postings every fresh catalog starts with.
fn default_catalog() -> Vec<Internship> {
    vec![
        Internship {
            id: "db-1".to_string(),
            title: "Frontend Engineer Intern".to_string(),
            company: "TechFlow Systems".to_string(),
            location: "Remote".to_string(),
            description: "Work on cutting-edge React applications with a focus on UI/UX."
                .to_string(),
            required_skills: vec![
                "React".to_string(),
                "TypeScript".to_string(),
                "Tailwind CSS".to_string(),
            ],
            kind: InternshipType::OffCampus,
            salary: "₹25,000/month".to_string(),
            is_real: Some(true),
        },
        Internship {
            id: "db-2".to_string(),
            title: "Data Analyst Trainee".to_string(),
            company: "Global Analytics Co.".to_string(),
            location: "Bangalore, India".to_string(),
            description: "Learn to process large datasets and build predictive models."
                .to_string(),
            required_skills: vec![
                "Python".to_string(),
                "SQL".to_string(),
                "Data Visualization".to_string(),
            ],
            kind: InternshipType::Campus,
            salary: "₹30,000/month".to_string(),
            is_real: Some(true),
        },
    ]
}
