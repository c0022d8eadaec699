//! Deduplication Engine.
//!
//! Several lesson pages may embed the same video. Lessons are grouped by
//! media id and one canonical lesson is kept per group, so every distinct
//! asset is downloaded exactly once.
//!
//! Candidate ranking inside a group:
//!
//! 1. descriptive titles before `Lesson N` placeholders,
//! 2. longer titles before shorter ones,
//! 3. lower original ordinal first.
//!
//! Rule 2 is a naming preference carried over for compatibility with
//! existing download folders, not a correctness requirement.

use crate::resolve::ResolvedMedia;

use std::cmp::{Ordering, Reverse};
use std::collections::HashMap;
use tracing::info;

/// All resolved lessons sharing one media id, in input order.
///
/// Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaGroup {
    media_id: String,
    members: Vec<ResolvedMedia>,
}

impl MediaGroup {
    fn new(first: ResolvedMedia) -> Self {
        Self {
            media_id: first.media_id.clone(),
            members: vec![first],
        }
    }

    /// Media id shared by every member.
    pub fn media_id(&self) -> &str {
        &self.media_id
    }

    /// Members in the order they were contributed.
    pub fn members(&self) -> &[ResolvedMedia] {
        &self.members
    }

    /// Lowest original ordinal among the members.
    pub fn first_ordinal(&self) -> usize {
        self.members
            .iter()
            .map(|m| m.lesson.ordinal)
            .min()
            .unwrap_or_default()
    }

    /// Split the group into its canonical member and the discarded ones.
    fn into_ranked(mut self) -> Option<(ResolvedMedia, Vec<ResolvedMedia>)> {
        self.members.sort_by(rank);
        let mut members = self.members.into_iter();
        let canonical = members.next()?;
        Some((canonical, members.collect()))
    }
}

/// Ordering of candidates inside a group; the smallest is canonical.
pub fn rank(a: &ResolvedMedia, b: &ResolvedMedia) -> Ordering {
    let key = |m: &ResolvedMedia| {
        (
            m.is_generic_title,
            Reverse(m.lesson.title.chars().count()),
            m.lesson.ordinal,
        )
    };
    key(a).cmp(&key(b))
}

/// The single lesson kept for a media id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalAsset {
    /// Media id of the asset.
    pub media_id: String,
    /// Title chosen for the asset.
    pub chosen_title: String,
    /// Ordinal of the chosen lesson in the raw catalogue.
    pub original_ordinal: usize,
    /// The chosen lesson's resolution, kept for fetching.
    pub media: ResolvedMedia,
}

impl From<ResolvedMedia> for CanonicalAsset {
    fn from(media: ResolvedMedia) -> Self {
        Self {
            media_id: media.media_id.clone(),
            chosen_title: media.lesson.title.clone(),
            original_ordinal: media.lesson.ordinal,
            media,
        }
    }
}

/// A lesson dropped in favour of another lesson with the same media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscardedDuplicate {
    /// The dropped lesson.
    pub discarded: ResolvedMedia,
    /// Ordinal of the lesson that was kept instead.
    pub kept_ordinal: usize,
    /// Title of the lesson that was kept instead.
    pub kept_title: String,
}

/// Result of deduplication.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deduplicated {
    /// One asset per media id, ascending by original ordinal.
    pub assets: Vec<CanonicalAsset>,
    /// Every candidate that lost to a canonical lesson.
    pub discarded: Vec<DiscardedDuplicate>,
}

/// Group `resolved` by media id, in first-seen order.
pub fn group_by_media(resolved: Vec<ResolvedMedia>) -> Vec<MediaGroup> {
    let mut groups: Vec<MediaGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for media in resolved {
        match index.get(&media.media_id) {
            Some(&i) => groups[i].members.push(media),
            None => {
                index.insert(media.media_id.clone(), groups.len());
                groups.push(MediaGroup::new(media));
            }
        }
    }
    groups.sort_by_key(MediaGroup::first_ordinal);
    groups
}

/// Keep one canonical lesson per media id.
///
/// The output never has more entries than the input, its media ids are
/// unique, and for a given input order it is always the same.
pub fn dedupe(resolved: Vec<ResolvedMedia>) -> Deduplicated {
    let mut result = Deduplicated::default();

    for group in group_by_media(resolved) {
        let count = group.members.len();
        let media_id = group.media_id.clone();
        let Some((canonical, rest)) = group.into_ranked() else {
            continue;
        };

        if count > 1 {
            info!(
                media_id = %media_id,
                "Found {} lessons with the same media, keeping \"{}\"",
                count,
                canonical.lesson.title
            );
        }
        for discarded in rest {
            info!(
                media_id = %media_id,
                ordinal = discarded.lesson.ordinal,
                "Skipping duplicate: \"{}\"",
                discarded.lesson.title
            );
            result.discarded.push(DiscardedDuplicate {
                discarded,
                kept_ordinal: canonical.lesson.ordinal,
                kept_title: canonical.lesson.title.clone(),
            });
        }

        result.assets.push(CanonicalAsset::from(canonical));
    }

    result.assets.sort_by_key(|a| a.original_ordinal);
    result
}
