//! Shutter command dispatch: URL assembly and the transport capability.
//!
//! The actuators expose one fixed endpoint:
//!
//! ```text
//! GET http://shutter-<name>.lan/control?cmd=event,shutter_<token>
//! ```
//!
//! Name and token are cut to their bounds before substitution, so the
//! assembled URL always fits [`URL_CAPACITY`].

use heapless::String;

use crate::bounded::push_truncated;
use crate::config::{
    HTTP_OK, MAX_TARGET_NAME_LEN, MAX_VERB_TOKEN_LEN, URL_CAPACITY, URL_INFIX, URL_PREFIX,
};
use crate::error::TransportError;
use crate::target::CommandVerb;

/// Assembled command URL.
pub type CommandUrl = String<URL_CAPACITY>;

const _: () = assert!(
    URL_PREFIX.len() + MAX_TARGET_NAME_LEN + URL_INFIX.len() + MAX_VERB_TOKEN_LEN <= URL_CAPACITY
);

/// Network capability: one GET per call; the loop waits for it.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Issue a GET for `url` and return the HTTP status code.
    async fn get(&mut self, url: &str) -> Result<u16, TransportError>;
}

/// Build the URL for `verb` on the shutter called `name`.
pub fn build_url(name: &str, verb: CommandVerb) -> CommandUrl {
    build_url_with_token(name, verb.token())
}

/// Same as [`build_url`] with a raw verb token.
pub fn build_url_with_token(name: &str, token: &str) -> CommandUrl {
    let mut url = CommandUrl::new();
    // Capacity is checked at compile time above; the pushes cannot fail.
    let _ = url.push_str(URL_PREFIX);
    push_truncated(&mut url, name, MAX_TARGET_NAME_LEN);
    let _ = url.push_str(URL_INFIX);
    push_truncated(&mut url, token, MAX_VERB_TOKEN_LEN);
    url
}

/// How a command ended, as far as the shutter is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandOutcome {
    /// Shutter answered 200.
    Delivered,
    /// Shutter answered with another status.
    Rejected(u16),
    /// No answer at all.
    Failed(TransportError),
}

impl CommandOutcome {
    pub fn from_response(response: Result<u16, TransportError>) -> Self {
        match response {
            Ok(HTTP_OK) => CommandOutcome::Delivered,
            Ok(status) => CommandOutcome::Rejected(status),
            Err(e) => CommandOutcome::Failed(e),
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, CommandOutcome::Delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_matches_actuator_contract() {
        let url = build_url("bedroom-1", CommandVerb::Lower);
        assert_eq!(
            url.as_str(),
            "http://shutter-bedroom-1.lan/control?cmd=event,shutter_down"
        );
    }

    #[test]
    fn every_verb_gets_its_token() {
        assert!(build_url("a", CommandVerb::Raise).ends_with("shutter_up"));
        assert!(build_url("a", CommandVerb::Stop).ends_with("shutter_stop"));
        assert!(build_url("a", CommandVerb::Lower).ends_with("shutter_down"));
    }

    #[test]
    fn oversized_name_and_token_are_truncated() {
        let url = build_url_with_token("abcdefghijklmnopqrstuvwxyz", "0123456789abcdefghijXYZ");
        assert_eq!(
            url.as_str(),
            "http://shutter-abcdefghijklmno.lan/control?cmd=event,shutter_0123456789abcdefghij"
        );
        assert!(url.len() <= URL_CAPACITY);
    }

    #[test]
    fn names_differing_past_the_bound_collide() {
        let a = build_url("abcdefghijklmnoA", CommandVerb::Stop);
        let b = build_url("abcdefghijklmnoB", CommandVerb::Stop);
        assert_eq!(a, b);
    }

    #[test]
    fn outcome_classification() {
        assert_eq!(
            CommandOutcome::from_response(Ok(200)),
            CommandOutcome::Delivered
        );
        assert_eq!(
            CommandOutcome::from_response(Ok(404)),
            CommandOutcome::Rejected(404)
        );
        assert_eq!(
            CommandOutcome::from_response(Err(TransportError::NoResponse)),
            CommandOutcome::Failed(TransportError::NoResponse)
        );
        assert!(!CommandOutcome::Rejected(500).is_delivered());
    }
}
