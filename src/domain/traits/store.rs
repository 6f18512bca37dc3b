use crate::application::errors::RosterError;
use crate::domain::entities::{Member, Service};

/// Per-service ordered rosters of pending members.
///
/// Purely structural; membership rules live in the coordinator.
pub trait RosterStore: Send + Sync {
    /// Members of `service` in insertion order
    fn get(&self, service: Service) -> &[Member];

    /// Append `member`; fails with `Full` when the roster is at capacity
    fn add(&mut self, service: Service, member: Member) -> Result<(), RosterError>;

    /// Remove `member`; fails with `MemberAbsent` when it is not present
    fn remove(&mut self, service: Service, member: &Member) -> Result<(), RosterError>;

    fn clear(&mut self, service: Service);

    fn len(&self, service: Service) -> usize {
        self.get(service).len()
    }

    fn contains(&self, service: Service, member: &Member) -> bool {
        self.get(service).contains(member)
    }
}
