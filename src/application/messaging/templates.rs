//! Outbound notification texts

use crate::domain::entities::{Action, Member, Service};

pub const ALREADY_MEMBER: &str = "You are already in the family for this service";
pub const NOT_MEMBER: &str = "You are not in the family for this service";
pub const INVALID_SERVICE: &str = "Invalid service choice.";

/// `@a, @b, @c` in roster order
pub fn members_list(members: &[Member]) -> String {
    members
        .iter()
        .map(Member::mention)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Update sent to roster members after someone joins or leaves.
pub fn roster_update(actor: &Member, action: Action, service: Service, members: &[Member]) -> String {
    let capacity = service.capacity();
    format!(
        "{} has {} the {} family\nMembers list: {}\nTotal allowed members amount: {}\nMembers left to find: {}",
        actor.mention(),
        action.verb(),
        service,
        members_list(members),
        capacity,
        capacity.saturating_sub(members.len()),
    )
}

pub fn leave_confirmation(service: Service) -> String {
    format!("You left the {} family", service)
}

pub fn family_created(service: Service, members: &[Member]) -> String {
    format!(
        "{} Family of {} created!\nMembers: {}\nPlease write your family members to set up the plan!",
        service,
        service.capacity(),
        members_list(members),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members(names: &[&str]) -> Vec<Member> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Member::new(*name, i as i64 + 1))
            .collect()
    }

    #[test]
    fn test_join_update() {
        let roster = members(&["alice", "bob"]);
        let text = roster_update(&roster[1], Action::Join, Service::Netflix, &roster);
        assert_eq!(
            text,
            "@bob has joined the Netflix family\nMembers list: @alice, @bob\nTotal allowed members amount: 4\nMembers left to find: 2"
        );
    }

    #[test]
    fn test_leave_update_with_empty_roster() {
        let leaver = Member::new("carol", 3);
        let text = roster_update(&leaver, Action::Leave, Service::YandexPlus, &[]);
        assert!(text.starts_with("@carol has left the Yandex+ family\n"));
        assert!(text.contains("Members list: \n"));
        assert!(text.ends_with("Members left to find: 8"));
    }

    #[test]
    fn test_family_created() {
        let roster = members(&["a", "b", "c", "d"]);
        assert_eq!(
            family_created(Service::Gpt, &roster),
            "GPT Family of 4 created!\nMembers: @a, @b, @c, @d\nPlease write your family members to set up the plan!"
        );
    }

    #[test]
    fn test_leave_confirmation() {
        assert_eq!(leave_confirmation(Service::Spotify), "You left the Spotify family");
    }
}
