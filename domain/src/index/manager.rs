//! Attribute index
//!
//! [`AttributeManager`] keeps an inverted index from attribute values to the
//! members holding them and uses it to decide whether a (hint, question)
//! pairing can currently produce a question, and to draw one.
//!
//! One type covers all attributes; the differences between them are carried
//! by its [`IndexingStrategy`]:
//!
//! - [`Partition::ByGender`] splits the index into male and female halves.
//!   Members without gender are never indexed, and distractors are only drawn
//!   from the member's own half.
//! - [`Staleness::Daily`] recomputes the whole index from its snapshots on the
//!   first access of a new calendar day (ages).
//!
//! The index owns copies of the members it was given. Changing a [`Member`]
//! afterwards has no effect until it is passed to [`AttributeManager::update_member`].
//!
//! Every access to the index happens under one lock per manager. No method
//! holds the lock while calling into another manager's locked state, so two
//! managers can query each other freely.

use crate::attribute::{Attribute, AttributeValue, IndexingStrategy, Partition, Staleness};
use crate::core::clock::{Clock, SystemClock};
use crate::core::error::DomainError;
use crate::member::{Gender, Member, MemberId};
use crate::quiz::draft::{QuestionDraft, Solution};
use chrono::NaiveDate;
use parking_lot::{Mutex, MutexGuard};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Attribute value → ids of the members holding it
pub type ValueBuckets = BTreeMap<AttributeValue, BTreeSet<MemberId>>;

/// Number of wrong options in a multiple choice question
pub const DISTRACTORS: usize = 3;

#[derive(Debug, Clone)]
struct Entry {
    member: Member,
    values: Vec<AttributeValue>,
}

#[derive(Debug, Default)]
struct ValueIndex {
    buckets: ValueBuckets,
    entries: BTreeMap<MemberId, Entry>,
}

impl ValueIndex {
    fn insert(&mut self, member: Member, values: Vec<AttributeValue>) {
        for value in &values {
            self.buckets.entry(value.clone()).or_default().insert(member.id);
        }
        self.entries.insert(member.id, Entry { member, values });
    }

    fn remove(&mut self, id: MemberId) -> Option<Entry> {
        let entry = self.entries.remove(&id)?;
        for value in &entry.values {
            if let Some(holders) = self.buckets.get_mut(value) {
                holders.remove(&id);
                if holders.is_empty() {
                    self.buckets.remove(value);
                }
            }
        }
        Some(entry)
    }

    /// Whether nobody but `id` holds `value`
    fn held_only_by(&self, value: &AttributeValue, id: MemberId) -> bool {
        self.buckets
            .get(value)
            .is_none_or(|holders| holders.iter().all(|holder| *holder == id))
    }
}

#[derive(Debug)]
enum Partitions {
    Flat(ValueIndex),
    Gendered { male: ValueIndex, female: ValueIndex },
}

impl Partitions {
    fn new(partition: Partition) -> Self {
        match partition {
            Partition::Flat => Partitions::Flat(ValueIndex::default()),
            Partition::ByGender => Partitions::Gendered {
                male: ValueIndex::default(),
                female: ValueIndex::default(),
            },
        }
    }

    fn all(&self) -> Vec<&ValueIndex> {
        match self {
            Partitions::Flat(index) => vec![index],
            Partitions::Gendered { male, female } => vec![male, female],
        }
    }

    fn for_member(&self, member: &Member) -> Option<&ValueIndex> {
        match (self, member.gender) {
            (Partitions::Flat(index), _) => Some(index),
            (Partitions::Gendered { male, .. }, Some(Gender::Male)) => Some(male),
            (Partitions::Gendered { female, .. }, Some(Gender::Female)) => Some(female),
            (Partitions::Gendered { .. }, None) => None,
        }
    }

    fn for_member_mut(&mut self, member: &Member) -> Option<&mut ValueIndex> {
        match (self, member.gender) {
            (Partitions::Flat(index), _) => Some(index),
            (Partitions::Gendered { male, .. }, Some(Gender::Male)) => Some(male),
            (Partitions::Gendered { female, .. }, Some(Gender::Female)) => Some(female),
            (Partitions::Gendered { .. }, None) => None,
        }
    }

    fn gender(&self, gender: Gender) -> Option<&ValueIndex> {
        match self {
            Partitions::Flat(_) => None,
            Partitions::Gendered { male, female } => match gender {
                Gender::Male => Some(male),
                Gender::Female => Some(female),
            },
        }
    }

    fn contains(&self, id: MemberId) -> bool {
        self.all().iter().any(|index| index.entries.contains_key(&id))
    }

    fn remove(&mut self, id: MemberId) -> bool {
        match self {
            Partitions::Flat(index) => index.remove(id).is_some(),
            Partitions::Gendered { male, female } => {
                // Evaluate both: a stale snapshot may sit in either half
                let from_male = male.remove(id).is_some();
                let from_female = female.remove(id).is_some();
                from_male || from_female
            }
        }
    }

    fn into_members(self) -> Vec<Member> {
        let indexes = match self {
            Partitions::Flat(index) => vec![index],
            Partitions::Gendered { male, female } => vec![male, female],
        };
        indexes
            .into_iter()
            .flat_map(|index| index.entries.into_values().map(|entry| entry.member))
            .collect()
    }
}

#[derive(Debug)]
struct IndexState {
    partitions: Partitions,
    rebuilt_on: Option<NaiveDate>,
    rebuilds: u64,
}

/// Index of one [`Attribute`] over the registered members
///
/// Managers compare equal by attribute, and can be compared to an
/// [`Attribute`] or its name directly.
pub struct AttributeManager {
    attribute: Attribute,
    questionable: Vec<Attribute>,
    strategy: IndexingStrategy,
    clock: Arc<dyn Clock>,
    state: Mutex<IndexState>,
}

impl AttributeManager {
    /// Manager with the attribute's default pairing rules and strategy
    pub fn new(attribute: Attribute) -> Self {
        Self::with_clock(attribute, Arc::new(SystemClock))
    }

    pub fn with_clock(attribute: Attribute, clock: Arc<dyn Clock>) -> Self {
        let strategy = attribute.strategy();
        Self {
            attribute,
            questionable: attribute.questionable(),
            strategy,
            clock,
            state: Mutex::new(IndexState {
                partitions: Partitions::new(strategy.partition),
                rebuilt_on: None,
                rebuilds: 0,
            }),
        }
    }

    /// Replace the attributes this one may be paired with as hint
    pub fn with_questionable(mut self, questionable: impl IntoIterator<Item = Attribute>) -> Self {
        self.questionable = questionable.into_iter().collect();
        self
    }

    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    pub fn strategy(&self) -> IndexingStrategy {
        self.strategy
    }

    pub fn questionable_attributes(&self) -> &[Attribute] {
        &self.questionable
    }

    /// Whether `question` is ever a valid question for this attribute as hint
    pub fn can_question(&self, question: Attribute) -> bool {
        self.questionable.contains(&question)
    }

    /// The member's values for this attribute as of today
    ///
    /// Members without gender have no value for gender-partitioned attributes.
    pub fn values_of(&self, member: &Member) -> Vec<AttributeValue> {
        if self.strategy.partition == Partition::ByGender && member.gender.is_none() {
            return Vec::new();
        }
        self.attribute.values_of(member, self.clock.today())
    }

    fn lock(&self) -> MutexGuard<'_, IndexState> {
        let mut state = self.state.lock();
        if self.strategy.staleness == Staleness::Daily {
            let today = self.clock.today();
            if state.rebuilt_on.is_none_or(|last| today > last) {
                self.rebuild(&mut state, today);
            }
        }
        state
    }

    fn rebuild(&self, state: &mut IndexState, today: NaiveDate) {
        let partitions = std::mem::replace(
            &mut state.partitions,
            Partitions::new(self.strategy.partition),
        );
        let members = partitions.into_members();
        state.rebuilds += 1;
        debug!(
            attribute = %self.attribute,
            members = members.len(),
            rebuilds = state.rebuilds,
            %today,
            "Rebuilding index"
        );
        for member in members {
            self.insert(&mut state.partitions, member);
        }
        state.rebuilt_on = Some(today);
    }

    fn insert(&self, partitions: &mut Partitions, member: Member) {
        let values = self.values_of(&member);
        if values.is_empty() {
            return;
        }
        match partitions.for_member_mut(&member) {
            Some(index) => index.insert(member, values),
            None => trace!(
                attribute = %self.attribute,
                member = %member.id,
                "Member without gender is not indexed"
            ),
        }
    }

    /// Fails if the member is already indexed here
    pub fn check_registrable(&self, member: &Member) -> Result<(), DomainError> {
        if self.lock().partitions.contains(member.id) {
            return Err(DomainError::AlreadyRegistered(member.id));
        }
        Ok(())
    }

    /// Index a copy of `member`
    ///
    /// Registering a member without a value for this attribute does nothing.
    pub fn register_member(&self, member: &Member) -> Result<(), DomainError> {
        let mut state = self.lock();
        if state.partitions.contains(member.id) {
            return Err(DomainError::AlreadyRegistered(member.id));
        }
        self.insert(&mut state.partitions, member.clone());
        Ok(())
    }

    /// Remove the member, if present
    pub fn kick_member(&self, member: &Member) {
        self.lock().partitions.remove(member.id);
    }

    /// Replace the indexed copy of `member` by the given one
    pub fn update_member(&self, member: &Member) {
        let mut state = self.lock();
        state.partitions.remove(member.id);
        self.insert(&mut state.partitions, member.clone());
    }

    /// Snapshot of the whole index, both genders merged
    pub fn data(&self) -> ValueBuckets {
        let state = self.lock();
        let mut data = ValueBuckets::new();
        for index in state.partitions.all() {
            for (value, holders) in &index.buckets {
                data.entry(value.clone())
                    .or_default()
                    .extend(holders.iter().copied());
            }
        }
        data
    }

    /// Male half of a gender-partitioned index
    pub fn male_data(&self) -> Option<ValueBuckets> {
        self.gender_data(Gender::Male)
    }

    /// Female half of a gender-partitioned index
    pub fn female_data(&self) -> Option<ValueBuckets> {
        self.gender_data(Gender::Female)
    }

    fn gender_data(&self, gender: Gender) -> Option<ValueBuckets> {
        self.lock()
            .partitions
            .gender(gender)
            .map(|index| index.buckets.clone())
    }

    /// Members that currently have a value for this attribute
    pub fn available_members(&self) -> BTreeSet<MemberId> {
        self.lock()
            .partitions
            .all()
            .iter()
            .flat_map(|index| index.entries.keys().copied())
            .collect()
    }

    /// The indexed copy of a member
    pub fn snapshot(&self, id: MemberId) -> Option<Member> {
        self.lock()
            .partitions
            .all()
            .iter()
            .find_map(|index| index.entries.get(&id))
            .map(|entry| entry.member.clone())
    }

    /// Whether the two members have at least one value in common
    pub fn members_share_attribute(&self, first: &Member, second: &Member) -> bool {
        let first = self.values_of(first);
        if first.is_empty() {
            return false;
        }
        self.values_of(second).iter().any(|value| first.contains(value))
    }

    /// Values usable as wrong options for `member`
    ///
    /// These are the values of this attribute none of whose holders shares a
    /// value with `member`, neither under this attribute nor under `other`.
    /// For gender-partitioned indexes only the member's own half is searched.
    pub fn distinct_values_for_member(
        &self,
        other: &AttributeManager,
        member: &Member,
    ) -> BTreeSet<AttributeValue> {
        let own = self.values_of(member);
        if own.is_empty() {
            return BTreeSet::new();
        }
        let state = self.lock();
        let Some(index) = state.partitions.for_member(member) else {
            return BTreeSet::new();
        };
        index
            .buckets
            .iter()
            .filter(|(value, _)| !own.contains(value))
            .filter(|(_, holders)| {
                !holders.iter().any(|id| {
                    index.entries.get(id).is_some_and(|entry| {
                        entry.values.iter().any(|value| own.contains(value))
                            || other.members_share_attribute(member, &entry.member)
                    })
                })
            })
            .map(|(value, _)| value.clone())
            .collect()
    }

    /// The member's values that no other member holds
    ///
    /// For gender-partitioned indexes the value must be unique across both
    /// halves.
    pub fn unique_attributes_of(&self, member: &Member) -> Vec<AttributeValue> {
        let own = self.values_of(member);
        if own.is_empty() {
            return own;
        }
        let state = self.lock();
        let indexes = state.partitions.all();
        own.into_iter()
            .filter(|value| indexes.iter().all(|index| index.held_only_by(value, member.id)))
            .collect()
    }

    /// Whether `member` can serve as hint for a question about `other`
    ///
    /// Multiple choice needs at least three wrong options. Free text needs an
    /// answer and a hint value that identifies the member.
    pub fn is_hintable_with_member(
        &self,
        other: &AttributeManager,
        member: &Member,
        multiple_choice: bool,
    ) -> bool {
        if multiple_choice {
            other.distinct_values_for_member(self, member).len() >= DISTRACTORS
        } else {
            !other.values_of(member).is_empty() && !self.unique_attributes_of(member).is_empty()
        }
    }

    /// Members present in both indexes, except the excluded ones
    fn candidates(&self, other: &AttributeManager, exclude: &[MemberId]) -> Vec<Member> {
        let theirs = other.available_members();
        let state = self.lock();
        state
            .partitions
            .all()
            .iter()
            .flat_map(|index| index.entries.values())
            .filter(|entry| theirs.contains(&entry.member.id) && !exclude.contains(&entry.member.id))
            .map(|entry| entry.member.clone())
            .collect()
    }

    /// Whether a question about `other` with this attribute as hint can be built right now
    pub fn is_hintable_with(
        &self,
        other: &AttributeManager,
        multiple_choice: bool,
        exclude: &[MemberId],
    ) -> bool {
        if !self.can_question(other.attribute) {
            return false;
        }
        self.candidates(other, exclude)
            .iter()
            .any(|member| self.is_hintable_with_member(other, member, multiple_choice))
    }

    /// Pick a member to ask about, uniformly among the eligible ones
    pub fn draw_hint_member<R: Rng + ?Sized>(
        &self,
        other: &AttributeManager,
        multiple_choice: bool,
        exclude: &[MemberId],
        rng: &mut R,
    ) -> Result<Member, DomainError> {
        if !self.can_question(other.attribute) {
            return Err(DomainError::NotQuestionable {
                hint: self.attribute,
                question: other.attribute,
            });
        }
        let eligible: Vec<Member> = self
            .candidates(other, exclude)
            .into_iter()
            .filter(|member| self.is_hintable_with_member(other, member, multiple_choice))
            .collect();
        eligible
            .choose(rng)
            .cloned()
            .ok_or(DomainError::NotHintable {
                hint: self.attribute,
                question: other.attribute,
            })
    }

    /// Draw the four options for `member`, with this attribute as question
    ///
    /// Returns the options and the index of the correct one.
    pub fn draw_question_attributes<R: Rng + ?Sized>(
        &self,
        other: &AttributeManager,
        member: &Member,
        rng: &mut R,
    ) -> Result<([AttributeValue; 4], usize), DomainError> {
        let correct = self
            .values_of(member)
            .choose(rng)
            .cloned()
            .ok_or(DomainError::MissingAttribute(self.attribute))?;

        let distinct: Vec<AttributeValue> = self
            .distinct_values_for_member(other, member)
            .into_iter()
            .collect();
        let insufficient = |available: usize| DomainError::InsufficientDistractors {
            attribute: self.attribute,
            available,
        };
        if distinct.len() < DISTRACTORS {
            return Err(insufficient(distinct.len()));
        }

        let mut options: Vec<AttributeValue> = distinct
            .choose_multiple(rng, DISTRACTORS)
            .cloned()
            .collect();
        options.shuffle(rng);
        let correct_index = rng.gen_range(0..=options.len());
        options.insert(correct_index, correct);

        let options: [AttributeValue; 4] = options
            .try_into()
            .map_err(|options: Vec<AttributeValue>| insufficient(options.len()))?;
        Ok((options, correct_index))
    }

    /// Draw a complete question with this attribute as hint and `other` as question
    pub fn build_question_with<R: Rng + ?Sized>(
        &self,
        other: &AttributeManager,
        multiple_choice: bool,
        exclude: &[MemberId],
        rng: &mut R,
    ) -> Result<QuestionDraft, DomainError> {
        let member = self.draw_hint_member(other, multiple_choice, exclude, rng)?;

        let (hint, solution) = if multiple_choice {
            let hint = self.values_of(&member).choose(rng).cloned();
            let (options, correct_index) = other.draw_question_attributes(self, &member, rng)?;
            (
                hint,
                Solution::MultipleChoice {
                    options,
                    correct_index,
                },
            )
        } else {
            let hint = self.unique_attributes_of(&member).choose(rng).cloned();
            let answers = other.values_of(&member);
            (hint, Solution::FreeText { answers })
        };
        let hint = hint.ok_or(DomainError::MissingAttribute(self.attribute))?;

        debug!(
            hint = %self.attribute,
            question = %other.attribute,
            member = %member.id,
            multiple_choice,
            "Built question"
        );
        Ok(QuestionDraft {
            member,
            hint_attribute: self.attribute,
            question_attribute: other.attribute,
            hint,
            solution,
        })
    }
}

impl fmt::Debug for AttributeManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AttributeManager({})", self.attribute)
    }
}

impl PartialEq for AttributeManager {
    fn eq(&self, other: &Self) -> bool {
        self.attribute == other.attribute
    }
}

impl Eq for AttributeManager {}

impl PartialEq<Attribute> for AttributeManager {
    fn eq(&self, other: &Attribute) -> bool {
        self.attribute == *other
    }
}

impl PartialEq<str> for AttributeManager {
    fn eq(&self, other: &str) -> bool {
        self.attribute.as_str() == other
    }
}

impl PartialEq<&str> for AttributeManager {
    fn eq(&self, other: &&str) -> bool {
        self.attribute.as_str() == *other
    }
}
