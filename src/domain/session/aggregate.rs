//! ClassificationSession aggregate.
//!
//! One session owns its prior, answer history, derived posterior, and loop
//! configuration; the question bank is shared, read-only, and passed in per
//! call. The answer history is the source of truth: the posterior and every
//! record's delta are recomputed from the original prior on each mutation,
//! which makes undo a pop-and-replay instead of a probabilistic inverse.
//!
//! # Invariants
//!
//! - The posterior always equals `replay(prior, history)` of the current records
//! - Record deltas always reflect the current history order
//! - `Done` is only ever observed with a freshly recomputed posterior

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::{
    AnswerLevel, EngineError, QuestionId, SessionId, Timestamp,
};
use crate::domain::inference::{pick_next, replay, Selection};
use crate::domain::probability::Belief;
use crate::domain::question::{Question, QuestionBank};

use super::{AnswerRecord, LoopConfig, SessionOutcome, SessionPhase};

/// A single user's classification session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationSession {
    /// Unique identifier for this session.
    id: SessionId,

    /// The starting belief, fixed at creation. Every replay begins here.
    prior: Belief,

    /// Derived projection of the answer history; never mutated in place.
    posterior: Belief,

    /// Current lifecycle phase.
    phase: SessionPhase,

    /// Ordered answer log - the source of truth for the posterior.
    records: Vec<AnswerRecord>,

    /// Stop-policy parameters; may change mid-session.
    config: LoopConfig,

    /// When the session was created.
    created_at: Timestamp,

    /// When the session was last updated.
    updated_at: Timestamp,
}

impl ClassificationSession {
    /// Creates a new session in `Collecting` with an empty history.
    pub fn new(id: SessionId, prior: Belief, config: LoopConfig) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            posterior: prior.clone(),
            prior,
            phase: SessionPhase::Collecting,
            records: Vec::new(),
            config,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuilds a session from persisted state.
    ///
    /// The posterior, deltas, and phase are derived by replaying the stored
    /// history against the bank, so persisted snapshots can never disagree
    /// with what the engine would compute.
    ///
    /// # Errors
    ///
    /// - `UnknownQuestion` if a stored record references an id the bank no
    ///   longer carries
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SessionId,
        prior: Belief,
        config: LoopConfig,
        records: Vec<AnswerRecord>,
        bank: &QuestionBank,
        created_at: Timestamp,
    ) -> Result<Self, EngineError> {
        let mut session = Self {
            id,
            posterior: prior.clone(),
            prior,
            phase: SessionPhase::Collecting,
            records,
            config,
            created_at,
            updated_at: Timestamp::now(),
        };
        session.recompute(bank)?;
        session.check_stop(bank);
        Ok(session)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    /// Returns the session ID.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the fixed starting belief.
    pub fn prior(&self) -> &Belief {
        &self.prior
    }

    /// Returns the current belief over archetypes.
    pub fn posterior(&self) -> &Belief {
        &self.posterior
    }

    /// Returns the current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Returns true once the session has stopped.
    pub fn is_done(&self) -> bool {
        self.phase == SessionPhase::Done
    }

    /// Returns the answer log in answer order.
    pub fn records(&self) -> &[AnswerRecord] {
        &self.records
    }

    /// Returns how many questions have been answered.
    pub fn asked_count(&self) -> usize {
        self.records.len()
    }

    /// Returns the loop configuration.
    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// Returns when the session was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the session was last updated.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Returns the ids of all answered questions.
    pub fn answered_ids(&self) -> HashSet<QuestionId> {
        self.records.iter().map(|r| r.question_id().clone()).collect()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────

    /// Picks the next question to ask by expected information gain.
    pub fn next_question<'a>(&self, bank: &'a QuestionBank) -> Selection<'a> {
        pick_next(&self.posterior, bank, &self.answered_ids())
    }

    /// Applies one answer: replay, delta refresh, stop check.
    ///
    /// # Errors
    ///
    /// - `SessionComplete` if the session is already `Done`
    /// - `UnknownQuestion` if the id is not in the bank (also raised for any
    ///   stored record the bank no longer resolves)
    /// - `DuplicateAnswer` if the question was already answered
    pub fn answer(
        &mut self,
        bank: &QuestionBank,
        question_id: &QuestionId,
        answer: AnswerLevel,
    ) -> Result<(), EngineError> {
        if !self.phase.accepts_answers() {
            return Err(EngineError::SessionComplete);
        }
        let question = Self::resolve(bank, question_id)?;
        if self.records.iter().any(|r| r.question_id() == question_id) {
            return Err(EngineError::DuplicateAnswer {
                id: question_id.as_str().to_string(),
            });
        }

        // Resolve the whole history before mutating anything, so a stale
        // record leaves the session untouched instead of half-updated.
        let mut history = self.resolve_history(bank)?;
        history.push((question, answer));

        let outcome = replay(&self.prior, &history);
        self.records.push(AnswerRecord::new(
            question_id.clone(),
            question.text().to_string(),
            answer,
        ));
        self.apply_replay(outcome.posterior, &outcome.deltas);
        self.check_stop(bank);
        Ok(())
    }

    /// Undoes the most recent answer, if any.
    ///
    /// Pops the last record, replays the shortened history, and re-enters
    /// `Collecting` - a session can never stay `Done` with a stale
    /// posterior. Returns the popped record, or `None` on an empty history.
    pub fn undo(&mut self, bank: &QuestionBank) -> Result<Option<AnswerRecord>, EngineError> {
        if self.records.is_empty() {
            return Ok(None);
        }

        let retained = &self.records[..self.records.len() - 1];
        let mut history = Vec::with_capacity(retained.len());
        for record in retained {
            history.push((Self::resolve(bank, record.question_id())?, record.answer()));
        }

        let outcome = replay(&self.prior, &history);
        let popped = self.records.pop();
        self.apply_replay(outcome.posterior, &outcome.deltas);
        self.phase = SessionPhase::Collecting;
        Ok(popped)
    }

    /// Replaces the loop configuration.
    ///
    /// Applies immediately but triggers no recomputation; only the next stop
    /// check sees the new parameters.
    pub fn set_config(&mut self, config: LoopConfig) {
        self.config = config;
        self.updated_at = Timestamp::now();
    }

    /// Returns the terminal outcome once the session is `Done`.
    pub fn outcome(&self) -> Option<SessionOutcome> {
        if !self.is_done() {
            return None;
        }
        let (archetype, confidence) = self.posterior.top();
        Some(SessionOutcome::new(archetype, confidence, &self.records))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────

    fn resolve<'a>(
        bank: &'a QuestionBank,
        id: &QuestionId,
    ) -> Result<&'a Question, EngineError> {
        bank.get(id).ok_or_else(|| EngineError::UnknownQuestion {
            id: id.as_str().to_string(),
        })
    }

    fn resolve_history<'a>(
        &self,
        bank: &'a QuestionBank,
    ) -> Result<Vec<(&'a Question, AnswerLevel)>, EngineError> {
        let mut history = Vec::with_capacity(self.records.len());
        for record in &self.records {
            history.push((Self::resolve(bank, record.question_id())?, record.answer()));
        }
        Ok(history)
    }

    fn recompute(&mut self, bank: &QuestionBank) -> Result<(), EngineError> {
        let history = self.resolve_history(bank)?;
        let outcome = replay(&self.prior, &history);
        self.apply_replay(outcome.posterior, &outcome.deltas);
        Ok(())
    }

    fn apply_replay(&mut self, posterior: Belief, deltas: &[f64]) {
        for (record, delta) in self.records.iter_mut().zip(deltas) {
            record.set_info_delta(*delta);
        }
        self.posterior = posterior;
        self.updated_at = Timestamp::now();
    }

    /// Evaluates the stopping policy against the current posterior.
    ///
    /// An exhausted bank is an implicit stop regardless of `min_questions`:
    /// with no question left to ask, the session can only terminate.
    fn check_stop(&mut self, bank: &QuestionBank) {
        if self.is_done() {
            return;
        }

        let asked = self.asked_count();
        let (top, confidence) = self.posterior.top();
        let answered = self.answered_ids();
        let exhausted = bank.iter().all(|q| answered.contains(q.id()));

        let must_continue = asked < self.config.min_questions() as usize;
        let threshold_met = confidence >= self.config.threshold();
        let cap_reached = asked >= self.config.max_questions() as usize;

        if exhausted || (!must_continue && (threshold_met || cap_reached)) {
            self.phase = SessionPhase::Done;
            tracing::debug!(
                session = %self.id,
                archetype = %top,
                confidence,
                asked,
                "classification session complete"
            );
        }
    }
}
