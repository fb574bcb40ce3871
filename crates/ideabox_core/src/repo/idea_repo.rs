//! Idea repository contract and key-value implementation.
//!
//! # Responsibility
//! - Provide CRUD + search over the flat idea collection.
//! - Own id generation, timestamping and first-access seeding.
//!
//! # Invariants
//! - Every mutation is a full read-modify-write of the collection under
//!   `IDEAS_KEY`; there are no partial writes.
//! - Write paths validate before persisting; read paths reject persisted data
//!   that violates record invariants instead of masking it.
//! - Seeding happens only when the key is absent, so at most once per
//!   storage lifetime.

use crate::clock::{Clock, SystemClock};
use crate::model::idea::{validate_idea_input, Idea, IdeaId, IdeaInput, IdeaPatch, ValidationError};
use crate::repo::seed::sample_ideas;
use crate::search::{search_ideas, IdeaFilter};
use crate::storage::{KeyValueStore, StorageError};
use log::{info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key holding the whole idea collection as a JSON array.
pub const IDEAS_KEY: &str = "ideas";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for idea persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    NotFound(IdeaId),
    Io(StorageError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "idea not found: {id}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Io(value)
    }
}

/// Repository interface for idea CRUD operations.
///
/// Every method takes `&mut self` because any access may seed storage.
pub trait IdeaRepository {
    /// All ideas in storage order.
    fn list(&mut self) -> RepoResult<Vec<Idea>>;
    fn get(&mut self, id: &IdeaId) -> RepoResult<Option<Idea>>;
    fn create(&mut self, input: &IdeaInput) -> RepoResult<Idea>;
    /// Merges `patch` into the stored record. Fails with `NotFound` for
    /// unknown ids.
    fn update(&mut self, id: &IdeaId, patch: IdeaPatch) -> RepoResult<Idea>;
    /// Removes the record; unknown ids are a no-op.
    fn delete(&mut self, id: &IdeaId) -> RepoResult<()>;

    fn search(&mut self, query: &str) -> RepoResult<Vec<Idea>> {
        Ok(search_ideas(&self.list()?, query))
    }

    fn filter(&mut self, filter: &IdeaFilter) -> RepoResult<Vec<Idea>> {
        Ok(filter.apply(&self.list()?))
    }
}

/// Idea repository over any `KeyValueStore`.
pub struct KvIdeaRepository<S: KeyValueStore> {
    store: S,
    clock: Box<dyn Clock>,
    seed_samples: bool,
}

impl<S: KeyValueStore> KvIdeaRepository<S> {
    /// Repository using the system clock with sample seeding enabled.
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: Box::new(SystemClock),
            seed_samples: true,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Controls whether first access writes the bundled sample ideas. When
    /// disabled, an absent collection reads as empty and nothing is written.
    pub fn with_seed_samples(mut self, seed_samples: bool) -> Self {
        self.seed_samples = seed_samples;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn load(&mut self) -> RepoResult<Vec<Idea>> {
        let Some(raw) = self.store.get(IDEAS_KEY)? else {
            return self.bootstrap();
        };
        Ok(decode_collection(&raw)?)
    }

    fn bootstrap(&mut self) -> RepoResult<Vec<Idea>> {
        if !self.seed_samples {
            return Ok(Vec::new());
        }

        let samples = sample_ideas()?;
        self.save(&samples)?;
        info!(
            "event=ideas_seed module=repo status=ok count={}",
            samples.len()
        );
        Ok(samples)
    }

    fn save(&mut self, ideas: &[Idea]) -> RepoResult<()> {
        let encoded = serde_json::to_string(ideas).map_err(StorageError::from)?;
        if let Err(err) = self.store.set(IDEAS_KEY, &encoded) {
            warn!(
                "event=ideas_save module=repo status=error count={} error={}",
                ideas.len(),
                err
            );
            return Err(err.into());
        }
        Ok(())
    }
}

impl<S: KeyValueStore> IdeaRepository for KvIdeaRepository<S> {
    fn list(&mut self) -> RepoResult<Vec<Idea>> {
        self.load()
    }

    fn get(&mut self, id: &IdeaId) -> RepoResult<Option<Idea>> {
        Ok(self.load()?.into_iter().find(|idea| &idea.id == id))
    }

    fn create(&mut self, input: &IdeaInput) -> RepoResult<Idea> {
        let fields = validate_idea_input(input)?;
        let mut ideas = self.load()?;

        let mut id = IdeaId::generate();
        while ideas.iter().any(|idea| idea.id == id) {
            id = IdeaId::generate();
        }

        let idea = Idea::from_fields(id, fields, self.clock.now());
        ideas.push(idea.clone());
        self.save(&ideas)?;

        info!(
            "event=idea_create module=repo status=ok idea_id={} total={}",
            idea.id,
            ideas.len()
        );
        Ok(idea)
    }

    fn update(&mut self, id: &IdeaId, patch: IdeaPatch) -> RepoResult<Idea> {
        let mut ideas = self.load()?;
        let Some(index) = ideas.iter().position(|idea| &idea.id == id) else {
            return Err(RepoError::NotFound(id.clone()));
        };

        let mut updated = ideas[index].clone();
        updated.apply_patch(patch, self.clock.now());
        updated.validate()?;

        ideas[index] = updated.clone();
        self.save(&ideas)?;

        info!(
            "event=idea_update module=repo status=ok idea_id={} idea_status={}",
            updated.id, updated.status
        );
        Ok(updated)
    }

    fn delete(&mut self, id: &IdeaId) -> RepoResult<()> {
        let mut ideas = self.load()?;
        let before = ideas.len();
        ideas.retain(|idea| &idea.id != id);

        if ideas.len() == before {
            info!("event=idea_delete module=repo status=noop idea_id={id}");
            return Ok(());
        }

        self.save(&ideas)?;
        info!(
            "event=idea_delete module=repo status=ok idea_id={} total={}",
            id,
            ideas.len()
        );
        Ok(())
    }
}

fn decode_collection(raw: &str) -> Result<Vec<Idea>, StorageError> {
    let corrupt = |message: String| StorageError::Corrupt {
        key: IDEAS_KEY.to_string(),
        message,
    };

    let ideas: Vec<Idea> = serde_json::from_str(raw).map_err(|err| corrupt(err.to_string()))?;

    let mut ids = HashSet::with_capacity(ideas.len());
    for idea in &ideas {
        idea.validate()
            .map_err(|err| corrupt(format!("idea `{}`: {err}", idea.id)))?;
        if idea.created_at > idea.updated_at {
            return Err(corrupt(format!(
                "idea `{}` has createdAt after updatedAt",
                idea.id
            )));
        }
        if !ids.insert(&idea.id) {
            return Err(corrupt(format!("duplicate idea id `{}`", idea.id)));
        }
    }

    Ok(ideas)
}
