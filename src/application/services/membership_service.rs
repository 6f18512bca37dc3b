//! Membership coordination: join/leave handling and family formation

use tokio::sync::Mutex;

use crate::application::errors::{BotError, DeliveryFailure};
use crate::application::messaging::templates;
use crate::domain::entities::{Action, Member, Service, UnknownService};
use crate::domain::traits::{Notifier, RosterStore};

/// What a membership request resulted in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Joined { service: Service, size: usize, capacity: usize },
    /// The join filled the roster; it has been notified and emptied
    FamilyCreated { service: Service, members: Vec<Member> },
    Left { service: Service, remaining: usize },
    AlreadyMember { service: Service },
    NotMember { service: Service },
    InvalidService(String),
}

/// Outcome plus every notification that could not be delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestReport {
    pub outcome: Outcome,
    pub failures: Vec<DeliveryFailure>,
}

impl RequestReport {
    fn new(outcome: Outcome) -> Self {
        Self { outcome, failures: Vec::new() }
    }

    pub fn all_delivered(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Owns every roster and serializes all requests behind one lock.
///
/// The lock is held for the whole request, notification fan-out included,
/// so requests for unrelated services wait on each other too.
pub struct MembershipCoordinator<S: RosterStore, N: Notifier> {
    rosters: Mutex<S>,
    notifier: N,
}

impl<S: RosterStore, N: Notifier> MembershipCoordinator<S, N> {
    pub fn new(store: S, notifier: N) -> Self {
        Self {
            rosters: Mutex::new(store),
            notifier,
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Current roster of `service`, in join order
    pub async fn snapshot(&self, service: Service) -> Vec<Member> {
        self.rosters.lock().await.get(service).to_vec()
    }

    pub async fn handle_request(
        &self,
        action: Action,
        service: &str,
        requester: Member,
    ) -> Result<RequestReport, BotError> {
        let mut rosters = self.rosters.lock().await;

        let service = match service.parse::<Service>() {
            Ok(service) => service,
            Err(UnknownService(token)) => {
                tracing::error!("Invalid service choice received: {}", token);
                return Ok(RequestReport::new(Outcome::InvalidService(token)));
            }
        };

        match action {
            Action::Join => self.join(&mut *rosters, service, requester).await,
            Action::Leave => self.leave(&mut *rosters, service, requester).await,
        }
    }

    async fn join(&self, rosters: &mut S, service: Service, requester: Member) -> Result<RequestReport, BotError> {
        if rosters.contains(service, &requester) {
            tracing::warn!(
                "User {} attempted to join the {} list but was already present",
                requester.display_name, service
            );
            let mut report = RequestReport::new(Outcome::AlreadyMember { service });
            self.deliver(requester.chat_id, templates::ALREADY_MEMBER, &mut report.failures).await;
            return Ok(report);
        }

        rosters.add(service, requester.clone())?;
        tracing::info!("User {} joined the {} list", requester.display_name, service);

        let members = rosters.get(service).to_vec();
        let capacity = service.capacity();
        let mut failures = Vec::new();

        let update = templates::roster_update(&requester, Action::Join, service, &members);
        self.fan_out(&members, &update, &mut failures).await;

        if members.len() == capacity {
            let created = templates::family_created(service, &members);
            self.fan_out(&members, &created, &mut failures).await;
            tracing::info!("{} family of {} created", service, capacity);

            // Only after everyone has seen the full roster
            rosters.clear(service);
            tracing::info!("The {} list has been cleared after forming a family", service);

            return Ok(RequestReport {
                outcome: Outcome::FamilyCreated { service, members },
                failures,
            });
        }

        Ok(RequestReport {
            outcome: Outcome::Joined { service, size: members.len(), capacity },
            failures,
        })
    }

    async fn leave(&self, rosters: &mut S, service: Service, requester: Member) -> Result<RequestReport, BotError> {
        if !rosters.contains(service, &requester) {
            tracing::warn!(
                "User {} attempted to leave the {} list but was not found",
                requester.display_name, service
            );
            let mut report = RequestReport::new(Outcome::NotMember { service });
            self.deliver(requester.chat_id, templates::NOT_MEMBER, &mut report.failures).await;
            return Ok(report);
        }

        rosters.remove(service, &requester)?;
        tracing::info!("User {} left the {} list", requester.display_name, service);

        let mut failures = Vec::new();
        self.deliver(requester.chat_id, &templates::leave_confirmation(service), &mut failures).await;

        let remaining = rosters.get(service).to_vec();
        let update = templates::roster_update(&requester, Action::Leave, service, &remaining);
        self.fan_out(&remaining, &update, &mut failures).await;

        Ok(RequestReport {
            outcome: Outcome::Left { service, remaining: remaining.len() },
            failures,
        })
    }

    /// Send `text` to every member in order; failures do not stop the loop.
    async fn fan_out(&self, members: &[Member], text: &str, failures: &mut Vec<DeliveryFailure>) {
        for member in members {
            if self.deliver(member.chat_id, text, failures).await {
                tracing::debug!("Notification sent to {}", member.display_name);
            }
        }
    }

    async fn deliver(&self, chat_id: i64, text: &str, failures: &mut Vec<DeliveryFailure>) -> bool {
        match self.notifier.send(chat_id, text).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to deliver notification to {}: {}", chat_id, e);
                failures.push(DeliveryFailure {
                    chat_id,
                    reason: e.to_string(),
                });
                false
            }
        }
    }
}
