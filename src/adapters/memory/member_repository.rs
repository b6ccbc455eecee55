use crate::container::{BeanDefinition, ComponentRegistration, Stereotype};
use crate::domain::{member::Member, value_objects::MemberId};
use crate::ports::member_repository::{MemberRepository, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// In-memory implementation of MemberRepository
///
/// No eviction, no persistence. Contents live as long as the instance.
pub struct MemoryMemberRepository {
    store: Mutex<HashMap<MemberId, Member>>,
}

impl MemoryMemberRepository {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(HashMap::new()),
        }
    }

    /// Number of stored members
    ///
    /// A poisoned lock still holds valid entries, so the count is read through it.
    pub fn len(&self) -> usize {
        self.store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryMemberRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MemberRepository for MemoryMemberRepository {
    async fn save(&self, member: Member) -> Result<()> {
        let mut store = self
            .store
            .lock()
            .map_err(|e| format!("member store poisoned: {}", e))?;
        tracing::debug!(member_id = %member.id, "Saving member");
        store.insert(member.id, member);
        Ok(())
    }

    async fn find_by_id(&self, member_id: MemberId) -> Result<Option<Member>> {
        let store = self
            .store
            .lock()
            .map_err(|e| format!("member store poisoned: {}", e))?;
        Ok(store.get(&member_id).cloned())
    }
}

inventory::submit! {
    ComponentRegistration::new(
        module_path!(),
        "MemoryMemberRepository",
        &[Stereotype::Repository],
        memory_member_repository_definition,
    )
}

fn memory_member_repository_definition(name: String) -> BeanDefinition {
    BeanDefinition::new(name, |_| {
        Ok(Arc::new(MemoryMemberRepository::new()) as Arc<dyn MemberRepository>)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Grade;

    #[tokio::test]
    async fn test_save_and_find() {
        let repository = MemoryMemberRepository::new();
        let member = Member::new(MemberId::new(), "memberA", Grade::Vip);

        repository.save(member.clone()).await.unwrap();

        let found = repository.find_by_id(member.id).await.unwrap();
        assert_eq!(found, Some(member));
        assert_eq!(repository.len(), 1);
    }

    #[tokio::test]
    async fn test_find_unknown_member() {
        let repository = MemoryMemberRepository::new();
        let found = repository.find_by_id(MemberId::new()).await.unwrap();
        assert_eq!(found, None);
        assert!(repository.is_empty());
    }

    #[tokio::test]
    async fn test_save_overwrites_same_id() {
        let repository = MemoryMemberRepository::new();
        let id = MemberId::new();

        repository
            .save(Member::new(id, "before", Grade::Basic))
            .await
            .unwrap();
        repository
            .save(Member::new(id, "after", Grade::Vip))
            .await
            .unwrap();

        let found = repository.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.name, "after");
        assert_eq!(found.grade, Grade::Vip);
        assert_eq!(repository.len(), 1);
    }

    #[tokio::test]
    async fn test_len_after_poisoned_lock() {
        let repository = Arc::new(MemoryMemberRepository::new());
        repository
            .save(Member::new(MemberId::new(), "memberA", Grade::Basic))
            .await
            .unwrap();

        let poisoner = Arc::clone(&repository);
        let result = std::thread::spawn(move || {
            let _guard = poisoner.store.lock().unwrap();
            panic!("poison the member store");
        })
        .join();
        assert!(result.is_err());
        assert!(repository.store.is_poisoned());

        assert_eq!(repository.len(), 1);
        assert!(!repository.is_empty());
        assert!(repository.find_by_id(MemberId::new()).await.is_err());
    }
}
