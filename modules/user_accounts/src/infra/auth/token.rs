use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::TokenIssuer;

/// Issues opaque, unguessable session tokens. The token carries no claims;
/// it is just a random handle.
#[derive(Default)]
pub struct OpaqueTokenIssuer;

impl OpaqueTokenIssuer {
    pub fn new() -> Self {
        Self
    }
}

impl TokenIssuer for OpaqueTokenIssuer {
    fn issue(&self, user_id: Uuid) -> String {
        debug!("Issuing session token for user {}", user_id);
        Uuid::new_v4().simple().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_unique_and_opaque() {
        let issuer = OpaqueTokenIssuer::new();
        let user = Uuid::new_v4();
        let a = issuer.issue(user);
        let b = issuer.issue(user);
        assert_ne!(a, b);
        // No claims leak into the token
        assert!(!a.contains(&user.to_string()));
    }
}
