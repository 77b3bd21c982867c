//! Scripted interaction handler.
//!
//! Pairs the first two agent-backed players of the roster and has them
//! trade canned lines, written to the journal as `talking` entries.

use async_trait::async_trait;
use chrono::{DateTime, Duration, SubsecRound, Utc};
use std::sync::{Arc, Mutex};
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::{ConversationOptions, EntryData, JournalEntry, PlayerSnapshot};
use crate::domain::ports::{ActivitySink, InteractionHandler, JournalRepository};

const SCRIPT: &[&str] = &[
    "Hi there! Nice day for a walk.",
    "It is. Have you been here long?",
    "A little while. I was just heading to the square.",
    "Mind if I join you?",
    "Not at all, let's go.",
    "Great, lead the way.",
];

/// Local stand-in for an interaction collaborator.
///
/// Message stamps are strictly increasing across every conversation this
/// handler runs and never ahead of the clock by more than the microseconds
/// needed to break ties.
pub struct ScriptedInteractionHandler {
    journal: Arc<dyn JournalRepository>,
    last_stamp: Mutex<Option<DateTime<Utc>>>,
}

impl ScriptedInteractionHandler {
    /// Handler writing talking entries to `journal`.
    pub fn new(journal: Arc<dyn JournalRepository>) -> Self {
        Self {
            journal,
            last_stamp: Mutex::new(None),
        }
    }

    /// Current time at stored precision, bumped past the previous stamp.
    fn next_stamp(&self) -> DateTime<Utc> {
        let now = Utc::now().trunc_subsecs(6);
        let mut last = self
            .last_stamp
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let stamp = match *last {
            Some(prev) if now <= prev => prev + Duration::microseconds(1),
            _ => now,
        };
        *last = Some(stamp);
        stamp
    }
}

fn line(index: usize) -> &'static str {
    SCRIPT[index % SCRIPT.len()]
}

#[async_trait]
impl InteractionHandler for ScriptedInteractionHandler {
    #[instrument(skip(self, roster, on_activity), fields(roster = roster.len()), err)]
    async fn run_one_conversation(
        &self,
        roster: &[PlayerSnapshot],
        options: ConversationOptions,
        on_activity: ActivitySink<'_>,
    ) -> DomainResult<()> {
        let participants: Vec<(&PlayerSnapshot, Uuid)> = roster
            .iter()
            .filter_map(|p| p.agent_id.map(|agent_id| (p, agent_id)))
            .take(2)
            .collect();

        if participants.len() < 2 {
            warn!(
                available = participants.len(),
                "conversation needs two agent-backed players; skipping"
            );
            return Ok(());
        }

        let conversation_id = Uuid::new_v4();

        for turn in 0..options.max_messages {
            let index = turn as usize;
            let (speaker, speaker_agent) = participants[index % 2];
            let (listener, _) = participants[(index + 1) % 2];

            let entry = JournalEntry::new(
                speaker.id,
                EntryData::Talking {
                    audience: vec![listener.id],
                    content: line(index).to_string(),
                    conversation_id,
                },
            )
            .at(self.next_stamp());
            self.journal.append(&entry).await?;

            on_activity(speaker_agent, "talking");
        }

        for (_, agent_id) in &participants {
            on_activity(*agent_id, "left conversation");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::models::{EntryKind, Player};
    use crate::services::WorldSeeder;
    use std::sync::Mutex;

    fn snapshots(players: &[Player]) -> Vec<PlayerSnapshot> {
        players.iter().map(PlayerSnapshot::idle).collect()
    }

    #[tokio::test]
    async fn test_alternates_speakers_up_to_cap() {
        let store = Arc::new(InMemoryStore::new());
        let seeded = WorldSeeder::new(store.clone(), store.clone(), store.clone())
            .seed("town", 3)
            .await
            .unwrap();
        let handler = ScriptedInteractionHandler::new(store.clone());
        let activity = Mutex::new(Vec::new());
        let sink = |agent_id: Uuid, what: &str| {
            activity.lock().unwrap().push((agent_id, what.to_string()));
        };

        handler
            .run_one_conversation(
                &snapshots(&seeded.players),
                ConversationOptions { max_messages: 3 },
                &sink,
            )
            .await
            .unwrap();

        let first = store.entries_of(seeded.players[0].id, EntryKind::Talking).await.unwrap();
        let second = store.entries_of(seeded.players[1].id, EntryKind::Talking).await.unwrap();
        let third = store.entries_of(seeded.players[2].id, EntryKind::Talking).await.unwrap();
        assert_eq!((first.len(), second.len(), third.len()), (2, 1, 0));
        assert!(first[0].ts < second[0].ts && second[0].ts < first[1].ts);

        let activity = activity.into_inner().unwrap();
        assert_eq!(activity.len(), 5);
        assert_eq!(activity[0], (seeded.agents[0].id, "talking".to_string()));
        assert_eq!(activity[1], (seeded.agents[1].id, "talking".to_string()));
    }

    #[tokio::test]
    async fn test_back_to_back_conversations_do_not_overlap() {
        let store = Arc::new(InMemoryStore::new());
        let seeded = WorldSeeder::new(store.clone(), store.clone(), store.clone())
            .seed("town", 2)
            .await
            .unwrap();
        let handler = ScriptedInteractionHandler::new(store.clone());
        let roster = snapshots(&seeded.players);
        let sink = |_: Uuid, _: &str| {};

        for _ in 0..2 {
            handler
                .run_one_conversation(&roster, ConversationOptions { max_messages: 50 }, &sink)
                .await
                .unwrap();
        }

        let mut entries = store.talking_entries_of(seeded.players[0].id).await.unwrap();
        entries.extend(store.talking_entries_of(seeded.players[1].id).await.unwrap());
        entries.sort_by_key(|e| e.ts);

        assert_eq!(entries.len(), 100);
        assert!(entries.windows(2).all(|pair| pair[0].ts < pair[1].ts));
        assert!(entries.iter().all(|e| e.ts.timestamp_subsec_nanos() % 1_000 == 0));

        let conversation_of = |entry: &JournalEntry| match entry.data {
            EntryData::Talking { conversation_id, .. } => conversation_id,
            _ => unreachable!("talking entries only"),
        };
        let switches = entries
            .windows(2)
            .filter(|pair| conversation_of(&pair[0]) != conversation_of(&pair[1]))
            .count();
        assert_eq!(switches, 1);
    }

    #[tokio::test]
    async fn test_too_few_agents_is_noop() {
        let store = Arc::new(InMemoryStore::new());
        let seeded = WorldSeeder::new(store.clone(), store.clone(), store.clone())
            .seed("town", 1)
            .await
            .unwrap();
        let handler = ScriptedInteractionHandler::new(store.clone());
        let sink = |_: Uuid, _: &str| panic!("no activity expected");

        handler
            .run_one_conversation(
                &snapshots(&seeded.players),
                ConversationOptions { max_messages: 4 },
                &sink,
            )
            .await
            .unwrap();

        assert!(store
            .talking_entries_of(seeded.players[0].id)
            .await
            .unwrap()
            .is_empty());
    }
}
