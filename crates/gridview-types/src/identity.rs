//! View identity: whose perspective this client renders.
//!
//! A view is addressed by path -- `/god` for the full-knowledge overview,
//! `/agent/{id}` for an autonomous agent's perspective, `/human-agent/{id}`
//! for a human-controlled agent. The identity is derived once at startup
//! and scopes every request the client makes for the rest of the session.

use serde::{Deserialize, Serialize};

/// The viewer's role and agent id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewIdentity {
    /// The full-knowledge overview at `/god`.
    God,
    /// An autonomous agent's perspective at `/agent/{id}`.
    Agent(String),
    /// A human-controlled agent's perspective at `/human-agent/{id}`.
    HumanAgent(String),
}

/// Error for a view path this client cannot interpret.
#[derive(Debug, thiserror::Error)]
#[error("unrecognized view path: {0}")]
pub struct ViewPathError(pub String);

impl ViewIdentity {
    /// Derive the identity from a view path.
    ///
    /// Ids are lowercased, matching how the server addresses agents.
    /// Trailing slashes are tolerated.
    ///
    /// # Errors
    ///
    /// Returns [`ViewPathError`] when the path matches none of the three
    /// view forms.
    pub fn from_path(path: &str) -> Result<Self, ViewPathError> {
        let trimmed = path.trim().trim_end_matches('/');
        let Some((prefix, id)) = trimmed.rsplit_once('/') else {
            return Err(ViewPathError(path.to_owned()));
        };
        let id = id.to_lowercase();

        match prefix.trim_start_matches('/') {
            "" if id == "god" => Ok(Self::God),
            "agent" if !id.is_empty() => Ok(Self::Agent(id)),
            "human-agent" if !id.is_empty() => Ok(Self::HumanAgent(id)),
            _ => Err(ViewPathError(path.to_owned())),
        }
    }

    /// The agent id used to scope server requests for this view.
    ///
    /// The god view is addressed by the literal id `god`.
    pub fn agent_id(&self) -> &str {
        match self {
            Self::God => "god",
            Self::Agent(id) | Self::HumanAgent(id) => id,
        }
    }

    /// Short view-kind label for logging.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::God => "god",
            Self::Agent(_) => "agent",
            Self::HumanAgent(_) => "human-agent",
        }
    }
}

impl core::fmt::Display for ViewIdentity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::God => write!(f, "/god"),
            Self::Agent(id) => write!(f, "/agent/{id}"),
            Self::HumanAgent(id) => write!(f, "/human-agent/{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn god_view_from_path() {
        let identity = ViewIdentity::from_path("/god");
        assert_eq!(identity.ok(), Some(ViewIdentity::God));
    }

    #[test]
    fn agent_view_from_path() {
        let identity = ViewIdentity::from_path("/agent/agent_0123");
        assert_eq!(
            identity.ok(),
            Some(ViewIdentity::Agent(String::from("agent_0123")))
        );
    }

    #[test]
    fn human_agent_view_from_path() {
        let identity = ViewIdentity::from_path("/human-agent/operator_7");
        assert_eq!(
            identity.ok(),
            Some(ViewIdentity::HumanAgent(String::from("operator_7")))
        );
    }

    #[test]
    fn ids_are_lowercased() {
        let identity = ViewIdentity::from_path("/agent/Agent_0123");
        assert_eq!(
            identity.as_ref().map(ViewIdentity::agent_id).ok(),
            Some("agent_0123")
        );
    }

    #[test]
    fn trailing_slash_tolerated() {
        let identity = ViewIdentity::from_path("/god/");
        assert_eq!(identity.ok(), Some(ViewIdentity::God));
    }

    #[test]
    fn god_view_agent_id_is_god() {
        assert_eq!(ViewIdentity::God.agent_id(), "god");
    }

    #[test]
    fn unknown_paths_rejected() {
        for path in ["/", "", "/spectator/x", "/agent/", "/gods"] {
            assert!(
                ViewIdentity::from_path(path).is_err(),
                "path {path:?} should be rejected"
            );
        }
    }

    #[test]
    fn display_round_trips() {
        let identity = ViewIdentity::Agent(String::from("agent_1"));
        let reparsed = ViewIdentity::from_path(&identity.to_string());
        assert_eq!(reparsed.ok(), Some(identity));
    }
}
