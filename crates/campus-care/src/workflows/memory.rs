//! Process-local stores backing the service until a hosted database is wired in.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

use super::assessments::{
    AssessmentId, AssessmentRecord, AssessmentRepository, MentalHealthStatus, StatusRepository,
};
use super::support_chat::{
    AlertError, ChatSession, ChatSessionRepository, CounselorAlert, CounselorAlertPublisher,
    SessionId,
};
use super::RepositoryError;
use crate::identity::UserId;

fn poisoned(what: &str) -> RepositoryError {
    RepositoryError::Unavailable(format!("{what} lock poisoned"))
}

/// Rows keyed by id, each stamped with its insertion sequence.
struct Table<K, V> {
    next_seq: u64,
    rows: HashMap<K, (u64, V)>,
}

impl<K, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            next_seq: 0,
            rows: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, V: Clone> Table<K, V> {
    fn insert(&mut self, key: K, value: V) -> Result<(), RepositoryError> {
        if self.rows.contains_key(&key) {
            return Err(RepositoryError::Conflict);
        }
        self.next_seq += 1;
        self.rows.insert(key, (self.next_seq, value));
        Ok(())
    }

    fn get(&self, key: &K) -> Option<&V> {
        self.rows.get(key).map(|(_, value)| value)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.rows.get_mut(key).map(|(_, value)| value)
    }

    /// Matching rows ordered by `stamp` descending; later inserts win ties.
    fn newest_first<T: Ord>(
        &self,
        keep: impl Fn(&V) -> bool,
        stamp: impl Fn(&V) -> T,
    ) -> Vec<V> {
        let mut rows: Vec<_> = self.rows.values().filter(|(_, value)| keep(value)).collect();
        rows.sort_by(|(a_seq, a), (b_seq, b)| stamp(b).cmp(&stamp(a)).then(b_seq.cmp(a_seq)));
        rows.into_iter().map(|(_, value)| value.clone()).collect()
    }
}

#[derive(Default, Clone)]
pub struct InMemoryAssessmentRepository {
    records: Arc<Mutex<Table<AssessmentId, AssessmentRecord>>>,
}

impl AssessmentRepository for InMemoryAssessmentRepository {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        let mut guard = self.records.lock().map_err(|_| poisoned("assessment"))?;
        guard.insert(record.id.clone(), record.clone())?;
        Ok(record)
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().map_err(|_| poisoned("assessment"))?;
        Ok(guard.get(id).cloned())
    }

    fn list_for_user(&self, user_id: &UserId) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().map_err(|_| poisoned("assessment"))?;
        Ok(guard.newest_first(|record| &record.user_id == user_id, |record| record.created_at))
    }
}

#[derive(Default, Clone)]
pub struct InMemoryStatusRepository {
    statuses: Arc<Mutex<HashMap<UserId, MentalHealthStatus>>>,
}

impl StatusRepository for InMemoryStatusRepository {
    fn record(&self, user_id: &UserId, status: MentalHealthStatus) -> Result<(), RepositoryError> {
        let mut guard = self.statuses.lock().map_err(|_| poisoned("status"))?;
        guard.insert(user_id.clone(), status);
        Ok(())
    }

    fn fetch(&self, user_id: &UserId) -> Result<Option<MentalHealthStatus>, RepositoryError> {
        let guard = self.statuses.lock().map_err(|_| poisoned("status"))?;
        Ok(guard.get(user_id).copied())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryChatSessionRepository {
    sessions: Arc<Mutex<Table<SessionId, ChatSession>>>,
}

impl ChatSessionRepository for InMemoryChatSessionRepository {
    fn insert(&self, session: ChatSession) -> Result<ChatSession, RepositoryError> {
        let mut guard = self.sessions.lock().map_err(|_| poisoned("chat session"))?;
        guard.insert(session.session_id.clone(), session.clone())?;
        Ok(session)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<ChatSession>, RepositoryError> {
        let guard = self.sessions.lock().map_err(|_| poisoned("chat session"))?;
        Ok(guard.get(id).cloned())
    }

    fn modify(
        &self,
        id: &SessionId,
        change: &mut dyn FnMut(&mut ChatSession),
    ) -> Result<Option<ChatSession>, RepositoryError> {
        let mut guard = self.sessions.lock().map_err(|_| poisoned("chat session"))?;
        Ok(guard.get_mut(id).map(|session| {
            change(session);
            session.clone()
        }))
    }

    fn upsert_with(
        &self,
        seed: ChatSession,
        change: &mut dyn FnMut(&mut ChatSession),
    ) -> Result<ChatSession, RepositoryError> {
        let mut guard = self.sessions.lock().map_err(|_| poisoned("chat session"))?;
        let id = seed.session_id.clone();
        if guard.get(&id).is_none() {
            guard.insert(id.clone(), seed)?;
        }
        let session = guard.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        change(session);
        Ok(session.clone())
    }

    fn recent_for_user(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<ChatSession>, RepositoryError> {
        let guard = self.sessions.lock().map_err(|_| poisoned("chat session"))?;
        let mut sessions = guard.newest_first(
            |session| session.user_id.as_ref() == Some(user_id),
            |session| session.created_at,
        );
        sessions.truncate(limit);
        Ok(sessions)
    }
}

/// Keeps published alerts in memory so they can be inspected or drained by a dashboard.
#[derive(Default, Clone)]
pub struct InMemoryAlertPublisher {
    events: Arc<Mutex<Vec<CounselorAlert>>>,
}

impl CounselorAlertPublisher for InMemoryAlertPublisher {
    fn publish(&self, alert: CounselorAlert) -> Result<(), AlertError> {
        let mut guard = self
            .events
            .lock()
            .map_err(|_| AlertError::Transport("alert lock poisoned".to_string()))?;
        guard.push(alert);
        Ok(())
    }
}

impl InMemoryAlertPublisher {
    pub fn events(&self) -> Vec<CounselorAlert> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}
