use std::fmt;

use super::User;

/// A pending member of a service roster.
///
/// Two members are the same iff both the display name and chat id match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Member {
    pub display_name: String,
    pub chat_id: i64,
}

impl Member {
    pub fn new(display_name: impl Into<String>, chat_id: i64) -> Self {
        Self {
            display_name: display_name.into(),
            chat_id,
        }
    }

    pub fn from_user(user: &User, chat_id: i64) -> Self {
        Self::new(user.display_name(), chat_id)
    }

    /// `@name` form used in every notification
    pub fn mention(&self) -> String {
        format!("@{}", self.display_name)
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name, self.chat_id)
    }
}
