//! Directory entities (persons, channels, teams, schedules, members) and
//! channel enrichment.

pub mod entities;
pub mod join;
pub mod members;
pub mod resolutions;

pub use entities::{ChannelInfo, PersonInfo, ScheduleInfo, TeamInfo, TeamMember};
pub use join::{collect_channel_ids, enrich_channels};
pub use members::{MemberInfo, MemberPage, TeamPage};
pub use resolutions::Resolutions;
