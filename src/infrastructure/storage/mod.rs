//! In-memory roster storage

use std::collections::HashMap;

use crate::application::errors::RosterError;
use crate::domain::entities::{Member, Service};
use crate::domain::traits::RosterStore;

/// Rosters kept in process memory; lost on restart
#[derive(Debug, Default)]
pub struct MemoryRosterStore {
    rosters: HashMap<Service, Vec<Member>>,
}

impl MemoryRosterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RosterStore for MemoryRosterStore {
    fn get(&self, service: Service) -> &[Member] {
        self.rosters.get(&service).map(Vec::as_slice).unwrap_or(&[])
    }

    fn add(&mut self, service: Service, member: Member) -> Result<(), RosterError> {
        let roster = self.rosters.entry(service).or_default();
        if roster.len() >= service.capacity() {
            return Err(RosterError::Full { service, capacity: service.capacity() });
        }
        roster.push(member);
        Ok(())
    }

    fn remove(&mut self, service: Service, member: &Member) -> Result<(), RosterError> {
        let absent = || RosterError::MemberAbsent { service, member: member.display_name.clone() };
        let roster = self.rosters.get_mut(&service).ok_or_else(absent)?;
        let index = roster.iter().position(|m| m == member).ok_or_else(absent)?;
        roster.remove(index);
        Ok(())
    }

    fn clear(&mut self, service: Service) {
        self.rosters.remove(&service);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_preserves_order() {
        let mut store = MemoryRosterStore::new();
        store.add(Service::Spotify, Member::new("a", 1)).unwrap();
        store.add(Service::Spotify, Member::new("b", 2)).unwrap();
        assert_eq!(store.get(Service::Spotify), &[Member::new("a", 1), Member::new("b", 2)]);
        assert!(store.get(Service::Netflix).is_empty());
    }

    #[test]
    fn test_remove_absent_member_is_signaled() {
        let mut store = MemoryRosterStore::new();
        let member = Member::new("a", 1);
        assert_eq!(
            store.remove(Service::Gpt, &member),
            Err(RosterError::MemberAbsent { service: Service::Gpt, member: "a".to_string() })
        );

        store.add(Service::Gpt, member.clone()).unwrap();
        assert!(store.remove(Service::Gpt, &Member::new("a", 2)).is_err());
        assert!(store.remove(Service::Gpt, &member).is_ok());
        assert_eq!(store.len(Service::Gpt), 0);
    }

    #[test]
    fn test_add_refuses_past_capacity() {
        let mut store = MemoryRosterStore::new();
        for i in 0..4 {
            store.add(Service::Netflix, Member::new(format!("m{}", i), i)).unwrap();
        }
        assert_eq!(
            store.add(Service::Netflix, Member::new("late", 9)),
            Err(RosterError::Full { service: Service::Netflix, capacity: 4 })
        );
    }

    #[test]
    fn test_clear() {
        let mut store = MemoryRosterStore::new();
        store.add(Service::Beeline, Member::new("a", 1)).unwrap();
        store.clear(Service::Beeline);
        assert!(store.get(Service::Beeline).is_empty());
        assert!(!store.contains(Service::Beeline, &Member::new("a", 1)));
    }
}
