//! Channel enrichment: owning team and creator names.

use super::entities::{ChannelInfo, PersonInfo, TeamInfo};
use crate::core::ids::{CollectedIds, ResolvedMap};

/// Collect the team and creator ids referenced by a batch of channels.
pub fn collect_channel_ids(channels: &[ChannelInfo]) -> CollectedIds {
    let mut ids = CollectedIds::new();
    for channel in channels {
        ids.teams.insert(channel.team_id);
        ids.persons.insert(channel.creator_id);
    }
    ids
}

/// Fill in `team_name` and `creator_name` on fresh copies of the channels.
///
/// Ids missing from the maps leave the corresponding name untouched.
pub fn enrich_channels(
    channels: &[ChannelInfo],
    teams: &ResolvedMap<TeamInfo>,
    persons: &ResolvedMap<PersonInfo>,
) -> Vec<ChannelInfo> {
    channels
        .iter()
        .map(|channel| {
            let mut enriched = channel.clone();
            if let Some(team) = teams.get(&channel.team_id) {
                enriched.team_name = team.team_name.clone();
            }
            if let Some(creator) = persons.get(&channel.creator_id) {
                enriched.creator_name = creator.person_name.clone();
            }
            enriched
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::index_by_key;

    #[test]
    fn test_collect_skips_unset_ids() {
        let channels = vec![
            ChannelInfo::new(1, "a").with_team(10).with_creator(7),
            ChannelInfo::new(2, "b").with_team(10),
            ChannelInfo::new(3, "c"),
        ];
        let ids = collect_channel_ids(&channels);
        assert_eq!(ids.teams.to_vec(), vec![10]);
        assert_eq!(ids.persons.to_vec(), vec![7]);
        assert!(ids.channels.is_empty());
    }

    #[test]
    fn test_enrich_channels_fills_names() {
        let channels = vec![
            ChannelInfo::new(1, "a").with_team(10).with_creator(7),
            ChannelInfo::new(2, "b").with_team(11).with_creator(8),
        ];
        let teams = index_by_key([TeamInfo::new(10, "SRE")]);
        let persons = index_by_key([PersonInfo::new(7, "Alice")]);

        let enriched = enrich_channels(&channels, &teams, &persons);

        assert_eq!(enriched[0].team_name, "SRE");
        assert_eq!(enriched[0].creator_name, "Alice");
        assert_eq!(enriched[1].team_id, 11);
        assert_eq!(enriched[1].team_name, "");
        assert_eq!(enriched[1].creator_id, 8);
        assert_eq!(enriched[1].creator_name, "");
        // input untouched
        assert_eq!(channels[0].team_name, "");
    }
}
