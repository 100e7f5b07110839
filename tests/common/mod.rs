// Shared in-memory MatchStore for exercising the matching engine without
// PostgreSQL. Mirrors the storage guarantees: one current decision per pair
// per side, and atomic create-if-absent on the match ledger.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;
use workmatch::core::{MatchStore, StoreError};
use workmatch::models::{ConsentDecision, Match, Project, Role, User};

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    projects: HashMap<Uuid, Project>,
    // (project_id, freelancer_id)
    client_decisions: HashMap<(Uuid, Uuid), ConsentDecision>,
    // (freelancer_id, project_id)
    freelancer_decisions: HashMap<(Uuid, Uuid), ConsentDecision>,
    // (freelancer_id, project_id)
    matches: HashMap<(Uuid, Uuid), Match>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn add_user(&self, name: &str, role: Role) -> Uuid {
        let id = Uuid::new_v4();
        let user = User {
            id,
            name: name.to_string(),
            role,
            skills: vec![],
            hourly_rate: None,
            is_active: true,
            created_at: Utc::now(),
        };
        self.inner.lock().unwrap().users.insert(id, user);
        id
    }

    pub fn add_project(&self, client_id: Uuid, title: &str) -> Uuid {
        let id = Uuid::new_v4();
        let project = Project {
            id,
            client_id,
            title: title.to_string(),
            skills: vec![],
            budget: None,
            created_at: Utc::now(),
        };
        self.inner.lock().unwrap().projects.insert(id, project);
        id
    }

    pub fn match_count(&self) -> usize {
        self.inner.lock().unwrap().matches.len()
    }

    pub fn match_for(&self, freelancer_id: Uuid, project_id: Uuid) -> Option<Match> {
        self.inner
            .lock()
            .unwrap()
            .matches
            .get(&(freelancer_id, project_id))
            .cloned()
    }
}

impl MatchStore for MemoryStore {
    async fn user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.inner.lock().unwrap().users.get(&id).cloned())
    }

    async fn project(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        Ok(self.inner.lock().unwrap().projects.get(&id).cloned())
    }

    async fn record_client_decision(
        &self,
        project_id: Uuid,
        freelancer_id: Uuid,
        decision: ConsentDecision,
    ) -> Result<(), StoreError> {
        self.inner
            .lock()
            .unwrap()
            .client_decisions
            .insert((project_id, freelancer_id), decision);
        Ok(())
    }

    async fn record_freelancer_decision(
        &self,
        freelancer_id: Uuid,
        project_id: Uuid,
        decision: ConsentDecision,
    ) -> Result<(), StoreError> {
        self.inner
            .lock()
            .unwrap()
            .freelancer_decisions
            .insert((freelancer_id, project_id), decision);
        Ok(())
    }

    async fn client_decision(
        &self,
        project_id: Uuid,
        freelancer_id: Uuid,
    ) -> Result<Option<ConsentDecision>, StoreError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .client_decisions
            .get(&(project_id, freelancer_id))
            .copied())
    }

    async fn freelancer_decision(
        &self,
        freelancer_id: Uuid,
        project_id: Uuid,
    ) -> Result<Option<ConsentDecision>, StoreError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .freelancer_decisions
            .get(&(freelancer_id, project_id))
            .copied())
    }

    async fn declined_freelancers(&self, project_id: Uuid) -> Result<Vec<Uuid>, StoreError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .client_decisions
            .iter()
            .filter(|((pid, _), decision)| *pid == project_id && **decision == ConsentDecision::Declined)
            .map(|((_, fid), _)| *fid)
            .collect())
    }

    async fn create_match_if_absent(
        &self,
        freelancer_id: Uuid,
        project_id: Uuid,
        client_id: Uuid,
    ) -> Result<(Match, bool), StoreError> {
        // Single lock section, so the check-and-insert is atomic exactly like
        // the database's unique pair constraint
        let mut inner = self.inner.lock().unwrap();

        if let Some(existing) = inner.matches.get(&(freelancer_id, project_id)) {
            return Ok((existing.clone(), false));
        }

        let record = Match {
            id: Uuid::new_v4(),
            freelancer_id,
            project_id,
            client_id,
            created_at: Utc::now(),
        };
        inner.matches.insert((freelancer_id, project_id), record.clone());

        Ok((record, true))
    }

    async fn find_match(&self, freelancer_id: Uuid, project_id: Uuid) -> Result<Option<Match>, StoreError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .matches
            .get(&(freelancer_id, project_id))
            .cloned())
    }
}
