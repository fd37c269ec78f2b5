/// The two names that accompany a chat file
///
/// Values are stored exactly as typed. Trimming only happens when checking
/// for emptiness, the service receives the raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityPair {
    /// The person who uploads the chat
    pub user_name: String,
    /// The person the gift is for
    pub friend_name: String,
}

impl IdentityPair {
    pub fn new(user_name: impl Into<String>, friend_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            friend_name: friend_name.into(),
        }
    }

    pub fn set_user_name(&mut self, name: impl Into<String>) {
        self.user_name = name.into();
    }

    pub fn set_friend_name(&mut self, name: impl Into<String>) {
        self.friend_name = name.into();
    }
}
