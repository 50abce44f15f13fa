//! Orchestra entity
//!
//! The member registry. Owns one [`AttributeManager`] per [`Attribute`] and
//! keeps every manager in sync with the registered members.

use crate::attribute::Attribute;
use crate::core::clock::{Clock, SystemClock};
use crate::core::error::DomainError;
use crate::index::AttributeManager;
use crate::member::{Member, MemberId};
use crate::score::{Score, ScorePeriod, UserScore, board};
use chrono::NaiveDate;
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::debug;

/// A (hint, question) pairing that can currently produce a question
pub type QuestionablePair<'a> = (&'a AttributeManager, &'a AttributeManager);

pub struct Orchestra {
    members: RwLock<BTreeMap<MemberId, Member>>,
    managers: [AttributeManager; Attribute::ALL.len()],
    scores: Mutex<HashMap<MemberId, UserScore>>,
    clock: Arc<dyn Clock>,
}

impl Orchestra {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            members: RwLock::new(BTreeMap::new()),
            managers: Attribute::ALL
                .map(|attribute| AttributeManager::with_clock(attribute, clock.clone())),
            scores: Mutex::new(HashMap::new()),
            clock,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Register a copy of `member` with every attribute index
    ///
    /// All indexes are checked before any of them is touched, so a rejected
    /// member leaves the orchestra unchanged.
    pub fn register_member(&self, member: &Member) -> Result<(), DomainError> {
        let mut members = self.members.write();
        if members.contains_key(&member.id) {
            return Err(DomainError::AlreadyRegistered(member.id));
        }
        for manager in &self.managers {
            manager.check_registrable(member)?;
        }
        members.insert(member.id, member.clone());
        for manager in &self.managers {
            manager.register_member(member)?;
        }
        debug!(member = %member.id, "Registered member");
        Ok(())
    }

    pub fn kick_member(&self, member: &Member) -> Result<(), DomainError> {
        let mut members = self.members.write();
        let old = members
            .remove(&member.id)
            .ok_or(DomainError::NotRegistered(member.id))?;
        for manager in &self.managers {
            manager.kick_member(&old);
        }
        debug!(member = %member.id, "Kicked member");
        Ok(())
    }

    /// Replace the stored copy of `member` and re-index it
    pub fn update_member(&self, member: &Member) -> Result<(), DomainError> {
        let mut members = self.members.write();
        let Some(stored) = members.get_mut(&member.id) else {
            return Err(DomainError::NotRegistered(member.id));
        };
        *stored = member.clone();
        for manager in &self.managers {
            manager.update_member(member);
        }
        debug!(member = %member.id, "Updated member");
        Ok(())
    }

    pub fn member(&self, id: MemberId) -> Option<Member> {
        self.members.read().get(&id).cloned()
    }

    /// Snapshot of all members, ordered by id
    pub fn members(&self) -> Vec<Member> {
        self.members.read().values().cloned().collect()
    }

    pub fn contains(&self, id: MemberId) -> bool {
        self.members.read().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.members.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.read().is_empty()
    }

    pub fn manager(&self, attribute: Attribute) -> &AttributeManager {
        &self.managers[attribute.index()]
    }

    pub fn attribute_managers(&self) -> &[AttributeManager] {
        &self.managers
    }

    /// All (hint, question) pairings that can produce a question right now
    ///
    /// Photos are always asked as multiple choice, whatever `multiple_choice`
    /// says. Members in `exclude` are never drawn as the subject.
    pub fn questionable(
        &self,
        multiple_choice: bool,
        exclude: &[MemberId],
    ) -> Vec<QuestionablePair<'_>> {
        let mut pairs = Vec::new();
        for hint in &self.managers {
            for question in &self.managers {
                if hint == question {
                    continue;
                }
                let multiple_choice =
                    multiple_choice || !question.attribute().allows_free_text();
                if hint.is_hintable_with(question, multiple_choice, exclude) {
                    pairs.push((hint, question));
                }
            }
        }
        debug!(
            multiple_choice,
            excluded = exclude.len(),
            pairs = pairs.len(),
            "Evaluated questionable pairs"
        );
        pairs
    }

    /// Count one answer of a registered member
    pub fn record_answer(
        &self,
        id: MemberId,
        correct: bool,
        date: NaiveDate,
    ) -> Result<(), DomainError> {
        if !self.contains(id) {
            return Err(DomainError::NotRegistered(id));
        }
        self.scores
            .lock()
            .entry(id)
            .or_default()
            .add_to_score(1, u32::from(correct), date)
    }

    pub fn user_score(&self, id: MemberId) -> Option<UserScore> {
        self.scores.lock().get(&id).cloned()
    }

    /// Members with at least one answer in `period`, best first
    pub fn score_board(&self, period: ScorePeriod, today: NaiveDate) -> Vec<(Member, Score)> {
        let members = self.members.read();
        let scores = self.scores.lock();
        let mut board: Vec<(Member, Score)> = scores
            .iter()
            .filter_map(|(id, user_score)| {
                let member = members.get(id)?;
                let score = user_score.score(period, today);
                (!score.is_empty()).then(|| (member.clone(), score))
            })
            .collect();
        board.sort_by(|(a, a_score), (b, b_score)| b_score.cmp(a_score).then(a.id.cmp(&b.id)));
        board
    }

    /// The leaderboard for `period` as text
    pub fn score_text(
        &self,
        period: ScorePeriod,
        today: NaiveDate,
        length: Option<usize>,
        html: bool,
    ) -> String {
        let entries: Vec<(Option<String>, Score)> = self
            .score_board(period, today)
            .into_iter()
            .map(|(member, score)| (member.full_name(), score))
            .collect();
        board::render(&entries, length, html)
    }
}

impl Default for Orchestra {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Orchestra {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestra")
            .field("members", &self.len())
            .finish()
    }
}
