//! crates/oracle_core/src/tarot.rs
//!
//! The tarot view's local state machine, `Input -> Shuffling -> Result`, and
//! the shuffle itself: the reading request races a pacing timer and the
//! result is only revealed once both have settled.

use std::time::Duration;

use tracing::{info, warn};

use crate::client::{ReadingClient, ReadingError, ReadingResult};
use crate::domain::{Mood, TarotReading, UserData};
use crate::panel::Ticket;
use crate::ports::{PortError, SpeechToTextService};
use crate::request::tarot_context;

/// Minimum time the shuffle is shown, however fast the oracle answers.
pub const SHUFFLE_FLOOR: Duration = Duration::from_secs(5);

pub const SHUFFLING_MESSAGE: &str = "Shuffling Destiny...";

#[derive(Debug, Clone, PartialEq)]
pub enum TarotStep {
    Input,
    Shuffling(Ticket),
    Result(TarotReading),
}

/// What a caller needs to run one shuffle.
#[derive(Debug, Clone, PartialEq)]
pub struct ShuffleOrder {
    pub ticket: Ticket,
    pub context: String,
}

#[derive(Debug, Clone)]
pub struct TarotFlow {
    question: String,
    mood: Option<Mood>,
    step: TarotStep,
}

impl Default for TarotFlow {
    fn default() -> Self {
        Self {
            question: String::new(),
            mood: None,
            step: TarotStep::Input,
        }
    }
}

impl TarotFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> &TarotStep {
        &self.step
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn mood(&self) -> Option<Mood> {
        self.mood
    }

    pub fn set_question(&mut self, question: impl Into<String>) -> bool {
        if self.step != TarotStep::Input {
            return false;
        }
        self.question = question.into();
        true
    }

    pub fn set_mood(&mut self, mood: Mood) -> bool {
        if self.step != TarotStep::Input {
            return false;
        }
        self.mood = Some(mood);
        true
    }

    /// "Continue" is enabled once a question and a mood are both set.
    pub fn can_continue(&self) -> bool {
        self.step == TarotStep::Input && !self.question.trim().is_empty() && self.mood.is_some()
    }

    /// `Input -> Shuffling`. The caller starts the shuffle with the returned order.
    pub fn begin(&mut self) -> Option<ShuffleOrder> {
        if !self.can_continue() {
            return None;
        }
        Some(self.start_shuffling())
    }

    /// `Result -> Shuffling` with the same question and mood.
    pub fn reshuffle(&mut self) -> Option<ShuffleOrder> {
        if !matches!(self.step, TarotStep::Result(_)) {
            return None;
        }
        Some(self.start_shuffling())
    }

    fn start_shuffling(&mut self) -> ShuffleOrder {
        let ticket = Ticket::new();
        self.step = TarotStep::Shuffling(ticket);
        ShuffleOrder {
            ticket,
            context: tarot_context(&self.question, self.mood.unwrap_or(Mood::Neutral)),
        }
    }

    /// Settles a shuffle: `Result` on success, back to `Input` (question and
    /// mood kept) on failure. Stale tickets are ignored.
    pub fn finish(&mut self, ticket: Ticket, result: ReadingResult<TarotReading>) -> bool {
        if self.step != TarotStep::Shuffling(ticket) {
            return false;
        }
        self.step = match result {
            Ok(reading) => TarotStep::Result(reading),
            Err(e) => {
                warn!("Tarot shuffle failed, returning to input: {}", e);
                TarotStep::Input
            }
        };
        true
    }

    /// Puts dictated text into the question field.
    pub fn apply_transcript(&mut self, transcript: &str) -> bool {
        self.set_question(transcript.trim())
    }

    /// Leaving the view forgets everything, including any shuffle in flight.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Runs `begin` (or `reshuffle` from a result), the shuffle, and `finish`.
    pub async fn draw(&mut self, client: &ReadingClient, user: &UserData, floor: Duration) -> bool {
        let order = match self.step {
            TarotStep::Result(_) => self.reshuffle(),
            _ => self.begin(),
        };
        let Some(order) = order else {
            return false;
        };
        let result = shuffle(client, user, &order.context, floor).await;
        self.finish(order.ticket, result)
    }
}

/// Fetches a spread while a pacing timer runs. Resolves after the later of
/// the two; a fetch failure resolves immediately.
pub async fn shuffle(
    client: &ReadingClient,
    user: &UserData,
    context: &str,
    floor: Duration,
) -> ReadingResult<TarotReading> {
    let fetch = client.fetch_tarot(user, context);
    let pacing = async {
        tokio::time::sleep(floor).await;
        Ok::<(), ReadingError>(())
    };
    let (reading, ()) = futures::try_join!(fetch, pacing)?;
    info!("Tarot spread revealed with {} cards", reading.cards.len());
    Ok(reading)
}

//=========================================================================================
// Dictation
//=========================================================================================

pub const SPEECH_UNAVAILABLE_NOTICE: &str = "Speech recognition not supported.";

#[derive(Debug, thiserror::Error)]
pub enum DictationError {
    #[error("Speech recognition not supported.")]
    Unavailable,
    #[error("Dictation failed: {0}")]
    Failed(#[from] PortError),
}

/// Transcribes a spoken question through the optional speech collaborator.
pub async fn dictate(
    speech: Option<&dyn SpeechToTextService>,
    audio: &[u8],
) -> Result<String, DictationError> {
    let speech = speech.ok_or(DictationError::Unavailable)?;
    let transcript = speech.transcribe_audio(audio).await?;
    Ok(transcript.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::ScriptedGenerator;
    use crate::client::GenerationSettings;
    use crate::ports::PortResult;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Arc;
    use tokio::time::Instant;

    const SPREAD: &str = r#"{"cards":[
        {"name":"The Star","description":"A figure pours water","meaning":"Hope"},
        {"name":"The Tower","description":"Lightning strikes","meaning":"Change"},
        {"name":"The Sun","description":"A child on a horse","meaning":"Joy"}
    ],"summary":"Light follows change."}"#;

    fn ada() -> UserData {
        UserData::new("Ada", NaiveDate::from_ymd_opt(1990, 8, 12).unwrap(), "London")
    }

    fn client(generator: ScriptedGenerator) -> (ReadingClient, Arc<ScriptedGenerator>) {
        let generator = Arc::new(generator);
        (
            ReadingClient::new(generator.clone(), GenerationSettings::default()),
            generator,
        )
    }

    /// The paused clock rounds timers up to the next millisecond.
    fn assert_settled_at(started: Instant, expected: Duration) {
        let elapsed = started.elapsed();
        assert!(
            elapsed >= expected && elapsed < expected + Duration::from_millis(10),
            "settled after {:?}, expected {:?}",
            elapsed,
            expected
        );
    }

    fn ready_flow() -> TarotFlow {
        let mut flow = TarotFlow::new();
        flow.set_question("Will my garden grow?");
        flow.set_mood(Mood::Happy);
        flow
    }

    #[test]
    fn continue_needs_question_and_mood() {
        let mut flow = TarotFlow::new();
        assert!(!flow.can_continue());
        assert_eq!(flow.begin(), None);

        flow.set_question("Will my garden grow?");
        assert!(!flow.can_continue());

        flow.set_mood(Mood::Sad);
        assert!(flow.can_continue());

        flow.set_question("   ");
        assert!(!flow.can_continue());
    }

    #[test]
    fn begin_moves_to_shuffling_with_the_question_context() {
        let mut flow = ready_flow();
        let order = flow.begin().unwrap();
        assert_eq!(flow.step(), &TarotStep::Shuffling(order.ticket));
        assert_eq!(order.context, "Question: Will my garden grow?, Mood: 😊 Happy");
        assert!(!flow.set_question("changed my mind"));
    }

    #[test]
    fn failure_returns_to_input_keeping_the_form() {
        let mut flow = ready_flow();
        let order = flow.begin().unwrap();
        assert!(flow.finish(order.ticket, Err(ReadingError::EmptyResponse)));
        assert_eq!(flow.step(), &TarotStep::Input);
        assert_eq!(flow.question(), "Will my garden grow?");
        assert_eq!(flow.mood(), Some(Mood::Happy));
    }

    #[test]
    fn results_after_leaving_the_view_are_dropped() {
        let mut flow = ready_flow();
        let order = flow.begin().unwrap();
        flow.reset();
        assert!(!flow.finish(order.ticket, Ok(TarotReading::default())));
        assert_eq!(flow.step(), &TarotStep::Input);
        assert_eq!(flow.question(), "");
    }

    #[test]
    fn reshuffle_is_only_offered_from_a_result() {
        let mut flow = ready_flow();
        assert_eq!(flow.reshuffle(), None);

        let order = flow.begin().unwrap();
        flow.finish(order.ticket, Ok(TarotReading::default()));
        let again = flow.reshuffle().unwrap();
        assert_ne!(again.ticket, order.ticket);
        assert_eq!(again.context, order.context);
        assert_eq!(flow.step(), &TarotStep::Shuffling(again.ticket));
    }

    #[tokio::test(start_paused = true)]
    async fn a_fast_oracle_still_waits_for_the_floor() {
        let (client, _) = client(ScriptedGenerator::replying(SPREAD).after(Duration::from_secs(1)));
        let mut flow = ready_flow();

        let started = Instant::now();
        assert!(flow.draw(&client, &ada(), SHUFFLE_FLOOR).await);

        assert_settled_at(started, Duration::from_secs(5));
        match flow.step() {
            TarotStep::Result(reading) => {
                assert_eq!(reading.cards.len(), 3);
                assert_eq!(reading.cards[0].name, "The Star");
                assert_eq!(reading.summary, "Light follows change.");
            }
            other => panic!("Expected a result, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn a_slow_oracle_sets_the_pace() {
        let (client, _) = client(ScriptedGenerator::replying(SPREAD).after(Duration::from_secs(7)));
        let mut flow = ready_flow();

        let started = Instant::now();
        flow.draw(&client, &ada(), SHUFFLE_FLOOR).await;

        assert_settled_at(started, Duration::from_secs(7));
        assert!(matches!(flow.step(), TarotStep::Result(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn a_failing_oracle_returns_to_input_without_waiting() {
        for delay in [Duration::from_secs(2), Duration::from_secs(6)] {
            let (client, _) = client(ScriptedGenerator::failing("network down").after(delay));
            let mut flow = ready_flow();

            let started = Instant::now();
            flow.draw(&client, &ada(), SHUFFLE_FLOOR).await;

            assert_settled_at(started, delay);
            assert_eq!(flow.step(), &TarotStep::Input);
            assert!(flow.can_continue());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn reshuffle_asks_the_same_question_again() {
        let (client, generator) = client(ScriptedGenerator::replying(SPREAD));
        let mut flow = ready_flow();

        flow.draw(&client, &ada(), SHUFFLE_FLOOR).await;
        flow.draw(&client, &ada(), SHUFFLE_FLOOR).await;

        let requests = generator.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].prompt, requests[1].prompt);
        assert!(requests[0].prompt.contains("Will my garden grow?"));
        assert!(matches!(flow.step(), TarotStep::Result(_)));
    }

    struct EchoSpeech;

    #[async_trait]
    impl SpeechToTextService for EchoSpeech {
        async fn transcribe_audio(&self, audio_data: &[u8]) -> PortResult<String> {
            Ok(format!("  {} bytes of wonder  ", audio_data.len()))
        }
    }

    #[tokio::test]
    async fn dictation_fills_the_question() {
        let speech = EchoSpeech;
        let transcript = dictate(Some(&speech as &dyn SpeechToTextService), &[0u8; 4]).await.unwrap();
        assert_eq!(transcript, "4 bytes of wonder");

        let mut flow = TarotFlow::new();
        assert!(flow.apply_transcript(&transcript));
        assert_eq!(flow.question(), "4 bytes of wonder");
    }

    #[tokio::test]
    async fn dictation_without_speech_support_raises_the_notice() {
        let err = dictate(None, &[1, 2, 3]).await.unwrap_err();
        assert!(matches!(err, DictationError::Unavailable));
        assert_eq!(err.to_string(), SPEECH_UNAVAILABLE_NOTICE);
    }
}
