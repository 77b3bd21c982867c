use proptest::prelude::*;
use simloop::application::plan_convergence;
use simloop::domain::models::{Player, PlayerSnapshot};
use simloop::MovementIntent;
use uuid::Uuid;

fn roster_from(agent_flags: &[bool]) -> Vec<PlayerSnapshot> {
    let world_id = Uuid::new_v4();
    agent_flags
        .iter()
        .enumerate()
        .map(|(i, &has_agent)| {
            let player = Player::new(world_id, format!("Player {i}"));
            let player = if has_agent {
                player.with_agent(Uuid::new_v4())
            } else {
                player
            };
            PlayerSnapshot::idle(&player)
        })
        .collect()
}

proptest! {
    /// Property: one stop for the first player, one walk per other agent-backed player
    #[test]
    fn prop_convergence_plan_counts(agent_flags in prop::collection::vec(any::<bool>(), 1..30)) {
        let roster = roster_from(&agent_flags);
        let plan = plan_convergence(&roster);
        let target = roster[0].id;

        prop_assert_eq!(&plan[0], &MovementIntent::Stop { player_id: target });

        let stops = plan.iter().filter(|i| matches!(i, MovementIntent::Stop { .. })).count();
        prop_assert_eq!(stops, 1);

        let expected_walkers = agent_flags[1..].iter().filter(|&&f| f).count();
        prop_assert_eq!(plan.len() - 1, expected_walkers);
    }

    /// Property: every walk targets the first player with an empty ignore set, in roster order
    #[test]
    fn prop_walks_target_first_player(agent_flags in prop::collection::vec(any::<bool>(), 1..30)) {
        let roster = roster_from(&agent_flags);
        let plan = plan_convergence(&roster);
        let target = roster[0].id;

        let expected_agents: Vec<Uuid> = roster[1..].iter().filter_map(|p| p.agent_id).collect();
        let mut walked_agents = Vec::new();
        for intent in &plan[1..] {
            match intent {
                MovementIntent::Walk { agent_id, ignore, destination } => {
                    prop_assert_eq!(*destination, target);
                    prop_assert!(ignore.is_empty());
                    walked_agents.push(*agent_id);
                }
                MovementIntent::Stop { .. } => prop_assert!(false, "only the first intent may stop"),
            }
        }
        prop_assert_eq!(walked_agents, expected_agents);
    }
}

#[test]
fn test_empty_roster_has_empty_plan() {
    assert!(plan_convergence(&[]).is_empty());
}
