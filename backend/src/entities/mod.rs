pub mod calls;
pub mod episodes;
pub mod languages;
pub mod locations;
pub mod messages;
pub mod network_admins;
pub mod network_paddings;
pub mod networks;
pub mod padding_contents;
pub mod people;
pub mod person_languages;
pub mod phone_numbers;
pub mod program_types;
pub mod programs;
pub mod recordings;
pub mod roles;
pub mod scheduled_blocks;
pub mod scheduled_programs;
pub mod station_analytics;
pub mod station_languages;
pub mod stations;
pub mod users;

pub mod prelude {
    pub use super::calls::Entity as Call;
    pub use super::episodes::Entity as Episode;
    pub use super::languages::Entity as Language;
    pub use super::locations::Entity as Location;
    pub use super::messages::Entity as Message;
    pub use super::network_admins::Entity as NetworkAdmin;
    pub use super::network_paddings::Entity as NetworkPadding;
    pub use super::networks::Entity as Network;
    pub use super::padding_contents::Entity as PaddingContent;
    pub use super::people::Entity as Person;
    pub use super::person_languages::Entity as PersonLanguage;
    pub use super::phone_numbers::Entity as PhoneNumber;
    pub use super::program_types::Entity as ProgramType;
    pub use super::programs::Entity as Program;
    pub use super::recordings::Entity as Recording;
    pub use super::roles::Entity as Role;
    pub use super::scheduled_blocks::Entity as ScheduledBlock;
    pub use super::scheduled_programs::Entity as ScheduledProgram;
    pub use super::station_analytics::Entity as StationAnalytic;
    pub use super::station_languages::Entity as StationLanguage;
    pub use super::stations::Entity as Station;
    pub use super::users::Entity as User;
}
