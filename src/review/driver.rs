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

use tokio::io::AsyncBufRead;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncWrite;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;
use tokio::io::stdin;
use tokio::io::stdout;

use crate::error::Fallible;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Card {
    pub front: String,
    pub back: String,
}

impl Card {
    /// Parse a `<front>\t<back>` line. Anything other than exactly two
    /// fields is not a card.
    pub fn parse(line: &str) -> Option<Self> {
        let mut fields = line.split('\t');
        match (fields.next(), fields.next(), fields.next()) {
            (Some(front), Some(back), None) => Some(Self {
                front: front.to_string(),
                back: back.to_string(),
            }),
            _ => None,
        }
    }
}

/// The events reported to the driver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    Pass,
    Fail,
    Quit,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Pass => "pass",
            Outcome::Fail => "fail",
            Outcome::Quit => "quit",
        }
    }
}

/// The card side of the driver channel: one card per line.
pub struct CardReader {
    input: Box<dyn AsyncBufRead + Send + Unpin>,
}

impl CardReader {
    /// Read the next card. Returns `None` when the input is exhausted,
    /// unreadable, or the line is not a card: all of these mean there are no
    /// more cards to review.
    pub async fn next_card(&mut self) -> Option<Card> {
        let mut buffer = Vec::new();
        match self.input.read_until(b'\n', &mut buffer).await {
            Ok(0) => {
                log::debug!("Card input exhausted.");
                return None;
            }
            Ok(_) => {}
            Err(e) => {
                log::error!("Failed to read card: {e}");
                return None;
            }
        }
        let line = String::from_utf8_lossy(&buffer);
        let line = line.trim_end_matches(['\n', '\r']);
        let card = Card::parse(line);
        if card.is_none() {
            log::debug!("Not a card: {line:?}");
        }
        card
    }
}

/// The outcome side of the driver channel: one outcome per line.
pub struct OutcomeWriter {
    output: Box<dyn AsyncWrite + Send + Unpin>,
}

impl OutcomeWriter {
    /// Write an outcome line and flush it.
    pub async fn emit(&mut self, outcome: Outcome) -> Fallible<()> {
        let line = format!("{}\n", outcome.as_str());
        self.output.write_all(line.as_bytes()).await?;
        self.output.flush().await?;
        Ok(())
    }
}

/// The line-oriented channel to the driver process: cards come in one per
/// line, outcomes go out one per line. The two halves are used
/// independently, so reporting an outcome never waits on a pending read.
pub struct Driver {
    pub reader: CardReader,
    pub writer: OutcomeWriter,
}

impl Driver {
    pub fn new(
        input: impl AsyncBufRead + Send + Unpin + 'static,
        output: impl AsyncWrite + Send + Unpin + 'static,
    ) -> Self {
        Self {
            reader: CardReader {
                input: Box::new(input),
            },
            writer: OutcomeWriter {
                output: Box::new(output),
            },
        }
    }

    /// A driver talking over standard input and output.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(stdin()), stdout())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::helper::Capture;

    fn driver(input: &str) -> (Driver, Capture) {
        let output = Capture::default();
        let driver = Driver::new(Cursor::new(input.as_bytes().to_vec()), output.clone());
        (driver, output)
    }

    #[test]
    fn test_parse_card() {
        assert_eq!(
            Card::parse("Q\tA"),
            Some(Card {
                front: "Q".to_string(),
                back: "A".to_string()
            })
        );
        assert_eq!(Card::parse("\t"), Some(Card::default()));
    }

    #[test]
    fn test_parse_card_field_count() {
        assert_eq!(Card::parse(""), None);
        assert_eq!(Card::parse("only a front"), None);
        assert_eq!(Card::parse("a\tb\tc"), None);
    }

    #[test]
    fn test_outcome_as_str() {
        assert_eq!(Outcome::Pass.as_str(), "pass");
        assert_eq!(Outcome::Fail.as_str(), "fail");
        assert_eq!(Outcome::Quit.as_str(), "quit");
    }

    #[tokio::test]
    async fn test_next_card() {
        let (mut driver, _) = driver("F1\tB1\r\nF2\tB2");
        let card = driver.reader.next_card().await.unwrap();
        assert_eq!(card.front, "F1");
        assert_eq!(card.back, "B1");
        let card = driver.reader.next_card().await.unwrap();
        assert_eq!(card.front, "F2");
        assert_eq!(card.back, "B2");
        assert_eq!(driver.reader.next_card().await, None);
    }

    #[tokio::test]
    async fn test_next_card_on_empty_input() {
        let (mut driver, _) = driver("");
        assert_eq!(driver.reader.next_card().await, None);
    }

    /// A malformed line ends the deck even if cards follow it.
    #[tokio::test]
    async fn test_next_card_on_malformed_line() {
        let (mut driver, _) = driver("not a card\nF\tB\n");
        assert_eq!(driver.reader.next_card().await, None);
    }

    #[tokio::test]
    async fn test_emit() -> Fallible<()> {
        let (mut driver, output) = driver("");
        driver.writer.emit(Outcome::Pass).await?;
        driver.writer.emit(Outcome::Fail).await?;
        driver.writer.emit(Outcome::Quit).await?;
        assert_eq!(output.contents(), "pass\nfail\nquit\n");
        Ok(())
    }
}
