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

use std::mem::replace;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::sync::watch;

use crate::config::Labels;
use crate::review::driver::Card;
use crate::review::driver::CardReader;
use crate::review::driver::Driver;
use crate::review::driver::Outcome;
use crate::review::driver::OutcomeWriter;
use crate::review::session::Session;

#[derive(Clone)]
pub struct ServerState {
    pub labels: Arc<Labels>,
    /// Held for the whole of a card fetch, so concurrent requests can't both
    /// take a card from the driver.
    reader: Arc<Mutex<CardReader>>,
    /// Never held across a read from the driver, so the session can always
    /// be ended.
    review: Arc<Mutex<Review>>,
    pub shutdown: Shutdown,
}

struct Review {
    session: Session,
    writer: OutcomeWriter,
}

impl ServerState {
    pub fn new(labels: Labels, driver: Driver) -> Self {
        Self {
            labels: Arc::new(labels),
            reader: Arc::new(Mutex::new(driver.reader)),
            review: Arc::new(Mutex::new(Review {
                session: Session::default(),
                writer: driver.writer,
            })),
            shutdown: Shutdown::default(),
        }
    }

    /// The current card, fetching one from the driver if the session is
    /// unlocked. Returns `None` if there is no card to show: the input is
    /// exhausted or the session has ended, possibly while the fetch was
    /// waiting on the driver.
    pub async fn fetch(&self) -> Option<Card> {
        let mut reader = self.reader.lock().await;
        {
            let review = self.review.lock().await;
            if review.session.is_ended() {
                return None;
            }
            if let Some(card) = review.session.card() {
                return Some(card.clone());
            }
        }
        let card = tokio::select! {
            card = reader.next_card() => card,
            _ = self.shutdown.wait() => {
                log::debug!("Card fetch abandoned.");
                None
            }
        };
        let mut review = self.review.lock().await;
        if review.session.is_ended() {
            return None;
        }
        let card = card?;
        log::debug!("Fetched card {:?}.", card.front);
        review.session.load(card.clone());
        Some(card)
    }

    /// Reveal the back of the current card, if any.
    pub async fn reveal(&self) -> Option<String> {
        let mut review = self.review.lock().await;
        review.session.reveal().map(|card| card.back.clone())
    }

    /// Resolve the current card and report the outcome to the driver.
    pub async fn answer(&self, outcome: Outcome) {
        let mut review = self.review.lock().await;
        if review.session.is_ended() {
            log::debug!("Ignoring {} after the session ended.", outcome.as_str());
            return;
        }
        review.session.unlock();
        log::debug!("Card resolved: {}.", outcome.as_str());
        if let Err(e) = review.writer.emit(outcome).await {
            log::error!("{e}");
        }
    }

    /// End the session: tell the driver, then stop the server. Only the
    /// first call reports to the driver.
    pub async fn end_session(&self) {
        {
            let mut review = self.review.lock().await;
            if review.session.end() {
                log::debug!("Session ended.");
                if let Err(e) = review.writer.emit(Outcome::Quit).await {
                    log::error!("{e}");
                }
            }
        }
        self.shutdown.trigger();
    }
}

/// A request to stop the server. Triggering it more than once is harmless,
/// and waiting on it after it was triggered returns at once.
#[derive(Clone)]
pub struct Shutdown {
    sender: Arc<watch::Sender<bool>>,
}

impl Default for Shutdown {
    fn default() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }
}

impl Shutdown {
    /// Returns `true` if this call sent the signal.
    pub fn trigger(&self) -> bool {
        let sent = self
            .sender
            .send_if_modified(|stopping| !replace(stopping, true));
        if sent {
            log::debug!("Shutdown requested.");
        }
        sent
    }

    /// Resolves once the signal has been sent.
    pub async fn wait(&self) {
        let mut rx = self.sender.subscribe();
        // This can only fail once the sender is dropped, and `self` holds it.
        let _ = rx.wait_for(|stopping| *stopping).await;
    }
}
