// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::mem::take;

use crate::review::driver::Card;

/// The single review slot. A card is locked from the moment it is fetched
/// until it is passed or failed, and while locked the same card is shown
/// no matter how often the page is reloaded.
#[derive(Debug, Default, PartialEq)]
pub enum Session {
    /// No card loaded.
    #[default]
    Empty,
    ShowingFront(Card),
    /// The back has been revealed at least once.
    ShowingBack(Card),
    /// Terminal: the session has quit.
    Ended,
}

impl Session {
    pub fn is_locked(&self) -> bool {
        matches!(self, Session::ShowingFront(_) | Session::ShowingBack(_))
    }

    pub fn is_ended(&self) -> bool {
        matches!(self, Session::Ended)
    }

    pub fn card(&self) -> Option<&Card> {
        match self {
            Session::ShowingFront(card) | Session::ShowingBack(card) => Some(card),
            Session::Empty | Session::Ended => None,
        }
    }

    /// Replace the slot with a freshly fetched card.
    pub fn load(&mut self, card: Card) {
        *self = Session::ShowingFront(card);
    }

    /// Reveal the back of the current card, if any.
    pub fn reveal(&mut self) -> Option<&Card> {
        if let Session::ShowingFront(card) = self {
            *self = Session::ShowingBack(take(card));
        }
        match self {
            Session::ShowingBack(card) => Some(card),
            _ => None,
        }
    }

    /// Release the current card so the next view fetches a new one.
    pub fn unlock(&mut self) {
        if self.is_locked() {
            *self = Session::Empty;
        }
    }

    /// Move to the terminal state. Returns `false` if the session had
    /// already ended.
    pub fn end(&mut self) -> bool {
        if self.is_ended() {
            false
        } else {
            *self = Session::Ended;
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> Card {
        Card {
            front: "Q".to_string(),
            back: "A".to_string(),
        }
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::default();
        assert_eq!(session, Session::Empty);
        assert!(!session.is_locked());
        assert!(!session.is_ended());
        assert_eq!(session.card(), None);
    }

    #[test]
    fn test_load_locks() {
        let mut session = Session::default();
        session.load(card());
        assert!(session.is_locked());
        assert_eq!(session.card(), Some(&card()));
    }

    #[test]
    fn test_reveal() {
        let mut session = Session::default();
        session.load(card());
        assert_eq!(session.reveal().map(|c| c.back.as_str()), Some("A"));
        assert_eq!(session, Session::ShowingBack(card()));
        // Revealing again is harmless.
        assert_eq!(session.reveal().map(|c| c.back.as_str()), Some("A"));
        assert!(session.is_locked());
    }

    #[test]
    fn test_reveal_without_card() {
        let mut session = Session::default();
        assert_eq!(session.reveal(), None);
        assert_eq!(session, Session::Empty);
    }

    #[test]
    fn test_unlock() {
        let mut session = Session::default();
        session.load(card());
        session.reveal();
        session.unlock();
        assert_eq!(session, Session::Empty);
        assert!(!session.is_locked());
    }

    #[test]
    fn test_unlock_from_front() {
        let mut session = Session::default();
        session.load(card());
        session.unlock();
        assert_eq!(session, Session::Empty);
    }

    #[test]
    fn test_end_is_terminal() {
        let mut session = Session::default();
        session.load(card());
        assert!(session.end());
        assert!(session.is_ended());
        assert!(!session.is_locked());
        assert!(!session.end());
        session.unlock();
        assert_eq!(session.reveal(), None);
        assert!(session.is_ended());
    }
}
