//! In-memory session store for the web front end.
//!
//! Each session sits behind its own async mutex, so turns within one
//! session are serialized while different sessions proceed concurrently.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use super::session::BrainstormSession;

/// Shared handle to one session.
pub type SessionHandle = Arc<Mutex<BrainstormSession>>;

/// Concurrent map of session id to session.
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<Uuid, SessionHandle>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a session, creating a fresh one when the id is absent or unknown.
    ///
    /// Unknown ids are not adopted: the new session always gets its own v4 id.
    pub fn open(&self, id: Option<Uuid>) -> (Uuid, SessionHandle) {
        if let Some(id) = id {
            if let Some(existing) = self.get(&id) {
                return (id, existing);
            }
        }

        let session = BrainstormSession::new(None);
        let id = session.id();
        let handle = Arc::new(Mutex::new(session));
        self.sessions.insert(id, Arc::clone(&handle));
        debug!(session_id = %id, "session created");
        (id, handle)
    }

    pub fn get(&self, id: &Uuid) -> Option<SessionHandle> {
        self.sessions.get(id).map(|h| Arc::clone(h.value()))
    }

    pub fn remove(&self, id: &Uuid) -> bool {
        self.sessions.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop sessions idle for longer than `max_idle`. Returns how many went.
    ///
    /// Sessions currently locked by a running turn are kept.
    pub fn prune_idle(&self, max_idle: Duration) -> usize {
        let max_idle = chrono::Duration::from_std(max_idle).unwrap_or(chrono::Duration::MAX);
        let now = Utc::now();
        let before = self.sessions.len();

        self.sessions.retain(|_, handle| match handle.try_lock() {
            Ok(session) => now.signed_duration_since(session.last_active_at()) <= max_idle,
            Err(_) => true,
        });

        let removed = before.saturating_sub(self.sessions.len());
        if removed > 0 {
            debug!(removed, remaining = self.sessions.len(), "pruned idle sessions");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brainstorm::responder::Responder;
    use crate::brainstorm::service::BrainstormService;
    use brainstorm_types::llm::LlmError;
    use brainstorm_types::persona::{Persona, PersonaId};
    use brainstorm_types::transcript::{Speaker, Transcript};
    use brainstorm_types::turn::Submission;

    /// Sleeps before answering so overlapping turns would interleave.
    struct SlowResponder;

    impl Responder for SlowResponder {
        async fn respond(&self, persona: &Persona, transcript: &Transcript) -> Result<String, LlmError> {
            let seen = transcript.len();
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(format!("{} saw {seen}", persona.id))
        }
    }

    #[test]
    fn test_open_without_id_creates() {
        let store = SessionStore::new();
        let (a, _) = store.open(None);
        let (b, _) = store.open(None);
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_open_known_id_reuses() {
        let store = SessionStore::new();
        let (id, first) = store.open(None);
        let (again, second) = store.open(Some(id));
        assert_eq!(id, again);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_open_unknown_id_gets_fresh_id() {
        let store = SessionStore::new();
        let stale = Uuid::new_v4();
        let (id, _) = store.open(Some(stale));
        assert_ne!(id, stale);
        assert!(store.get(&stale).is_none());
        assert!(store.get(&id).is_some());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let (_, a) = store.open(None);
        let (_, b) = store.open(None);

        a.lock().await.push_human("only in a");
        assert_eq!(a.lock().await.transcript().len(), 1);
        assert_eq!(b.lock().await.transcript().len(), 0);
    }

    #[test]
    fn test_prune_idle() {
        let store = SessionStore::new();
        store.open(None);
        store.open(None);

        assert_eq!(store.prune_idle(Duration::from_secs(3600)), 0);
        assert_eq!(store.len(), 2);

        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(store.prune_idle(Duration::from_millis(1)), 2);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_prune_skips_busy_session() {
        let store = SessionStore::new();
        let (id, handle) = store.open(None);
        let _guard = handle.lock().await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(store.prune_idle(Duration::from_millis(1)), 0);
        assert!(store.get(&id).is_some());
    }

    #[test]
    fn test_remove() {
        let store = SessionStore::new();
        let (id, _) = store.open(None);
        assert!(store.remove(&id));
        assert!(!store.remove(&id));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_turns_on_one_session_are_serialized() {
        let store = Arc::new(SessionStore::new());
        let service = Arc::new(BrainstormService::new(SlowResponder));
        let (id, handle) = store.open(None);
        handle.lock().await.reset(Some("Crows hold grudges".to_string()));

        let mut tasks = Vec::new();
        for _ in 0..3 {
            let store = Arc::clone(&store);
            let service = Arc::clone(&service);
            tasks.push(tokio::spawn(async move {
                let (_, handle) = store.open(Some(id));
                let mut session = handle.lock().await;
                service.submit(&mut session, Submission::default()).await
            }));
        }

        let mut indices = Vec::new();
        for task in tasks {
            let reply = task.await.unwrap().unwrap();
            indices.push(reply.position.next_agent_index);
        }
        indices.sort_unstable();
        assert_eq!(indices, vec![1, 2, 3]);

        let session = handle.lock().await;
        let lines = session.transcript().lines();
        let speakers: Vec<Speaker> = lines.iter().map(|l| l.speaker).collect();
        assert_eq!(
            speakers,
            PersonaId::ALL.iter().map(|p| Speaker::Persona(*p)).collect::<Vec<_>>()
        );
        // Each persona saw every earlier reply.
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["alpha saw 0", "beta saw 1", "gamma saw 2"]);
        assert!(!session.has_pending_turn());
    }
}
