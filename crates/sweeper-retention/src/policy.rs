use crate::entry::Entry;
use chrono::{DateTime, Days, Local, LocalResult, NaiveDate, NaiveTime, TimeZone};
use std::fmt;
use sweeper_config::{PolicyConfig, constants};

/// How many release entries survive a cleanup.
///
/// `keep_min` wins over both other rules: it can stop a removal but never
/// forces one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub older_than_days: u32,
    pub keep_max: usize,
    pub keep_min: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalReason {
    /// Older than the cutoff.
    Age,
    /// Among the oldest survivors while more than `keep_max` remained.
    Quota,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepReason {
    /// Removing it would drop the survivors below `keep_min`.
    Floor,
    /// Modified at or after the cutoff.
    Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Keep(KeepReason),
    Remove(RemovalReason),
}

#[derive(Debug, Clone)]
pub struct PlannedEntry {
    pub entry: Entry,
    pub decision: Decision,
}

/// The outcome of applying a policy to an eligible set, oldest entry first.
#[derive(Debug, Clone)]
pub struct RetentionPlan {
    pub cutoff: DateTime<Local>,
    pub entries: Vec<PlannedEntry>,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            older_than_days: constants::DEFAULT_OLDER_THAN_DAYS,
            keep_max: constants::DEFAULT_KEEP_MAX,
            keep_min: constants::DEFAULT_KEEP_MIN,
        }
    }
}

impl From<PolicyConfig> for RetentionPolicy {
    fn from(config: PolicyConfig) -> Self {
        Self {
            older_than_days: config.older_than_days,
            keep_max: config.keep_max,
            keep_min: config.keep_min,
        }
    }
}

impl RetentionPolicy {
    pub fn new(older_than_days: u32, keep_max: usize, keep_min: usize) -> Self {
        Self {
            older_than_days,
            keep_max,
            keep_min,
        }
    }

    pub fn plan(&self, entries: Vec<Entry>, now: DateTime<Local>) -> RetentionPlan {
        self.plan_with_cutoff(entries, age_cutoff(now, self.older_than_days))
    }

    pub fn plan_with_cutoff(
        &self,
        mut entries: Vec<Entry>,
        cutoff: DateTime<Local>,
    ) -> RetentionPlan {
        entries.sort_by(|a, b| {
            a.modified
                .cmp(&b.modified)
                .then_with(|| a.name.cmp(&b.name))
        });

        if entries.len() <= self.keep_min {
            return RetentionPlan {
                cutoff,
                entries: entries
                    .into_iter()
                    .map(|entry| PlannedEntry {
                        entry,
                        decision: Decision::Keep(KeepReason::Floor),
                    })
                    .collect(),
            };
        }

        let mut survivors = entries.len();
        let mut decisions = Vec::with_capacity(entries.len());

        for entry in &entries {
            let decision = if entry.modified >= cutoff {
                Decision::Keep(KeepReason::Time)
            } else if survivors <= self.keep_min {
                Decision::Keep(KeepReason::Floor)
            } else {
                survivors -= 1;
                Decision::Remove(RemovalReason::Age)
            };
            decisions.push(decision);
        }

        let limit = self.keep_max.max(self.keep_min);
        for decision in &mut decisions {
            if survivors <= limit {
                break;
            }
            if let Decision::Keep(_) = decision {
                *decision = Decision::Remove(RemovalReason::Quota);
                survivors -= 1;
            }
        }

        RetentionPlan {
            cutoff,
            entries: entries
                .into_iter()
                .zip(decisions)
                .map(|(entry, decision)| PlannedEntry { entry, decision })
                .collect(),
        }
    }
}

impl RetentionPlan {
    pub fn removals(&self) -> impl Iterator<Item = &PlannedEntry> {
        self.entries
            .iter()
            .filter(|planned| matches!(planned.decision, Decision::Remove(_)))
    }

    pub fn removal_count(&self) -> usize {
        self.removals().count()
    }

    pub fn survivor_count(&self) -> usize {
        self.entries.len() - self.removal_count()
    }
}

/// Local midnight today, moved back `older_than_days` calendar days.
pub fn age_cutoff(now: DateTime<Local>, older_than_days: u32) -> DateTime<Local> {
    let day = now
        .date_naive()
        .checked_sub_days(Days::new(u64::from(older_than_days)))
        .unwrap_or(NaiveDate::MIN);
    let midnight = day.and_time(NaiveTime::MIN);

    match midnight.and_local_timezone(Local) {
        LocalResult::Single(cutoff) => cutoff,
        LocalResult::Ambiguous(earliest, _) => earliest,
        // Midnight skipped by a DST transition
        LocalResult::None => Local.from_utc_datetime(&midnight),
    }
}

impl fmt::Display for RemovalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemovalReason::Age => write!(f, "older than cutoff"),
            RemovalReason::Quota => write!(f, "over keep-max quota"),
        }
    }
}

impl fmt::Display for KeepReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeepReason::Floor => write!(f, "keep-min floor"),
            KeepReason::Time => write!(f, "newer than cutoff"),
        }
    }
}
