use derive_more::Display;
use enum_primitive_derive::Primitive;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Primitive, Serialize, Deserialize)]
pub enum ServerType {
    #[display(fmt = "Unknown")]
    Unknown = 0,
    #[display(fmt = "Dedicated server")]
    Dedicated = 0x64,
    #[display(fmt = "Non-dedicated server")]
    NonDedicated = 0x6C,
    #[display(fmt = "SourceTV relay")]
    SourceTvRelay = 0x70,
}

impl Default for ServerType {
    fn default() -> ServerType {
        ServerType::Unknown
    }
}

impl ServerType {
    pub fn from_code(code: u8) -> Self {
        Self::from_u8(code).unwrap_or_default()
    }
}

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Primitive, Serialize, Deserialize)]
pub enum Environment {
    Unknown = 0,
    Linux = 0x6C,
    Windows = 0x77,
    Mac = 0x6F,
}

impl Default for Environment {
    fn default() -> Environment {
        Environment::Unknown
    }
}

impl Environment {
    pub fn from_code(code: u8) -> Self {
        match code {
            // Newer servers report macOS as 'm' rather than 'o'
            b'm' => Environment::Mac,
            other => Self::from_u8(other).unwrap_or_default(),
        }
    }
}

/// A2S_INFO result.
///
/// Fields gated by the extra data flags stay zero when the server omits them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SourceServerInfo {
    /// Round-trip time in milliseconds, `-1` when the query failed.
    pub delay: i64,
    pub protocol: u8,
    pub name: String,
    pub map: String,
    pub folder: String,
    pub game: String,
    #[serde(rename = "AppID")]
    pub app_id: u16,
    #[serde(rename = "Player")]
    pub players: u8,
    #[serde(rename = "PlayerMax")]
    pub max_players: u8,
    #[serde(rename = "Robot")]
    pub bots: u8,
    pub server_type: ServerType,
    pub environment: Environment,
    pub visibility: bool,
    pub vac: bool,
    pub version: String,

    pub port: u16,
    #[serde(rename = "SteamID")]
    pub steam_id: u64,
    #[serde(rename = "TVPort")]
    pub tv_port: u16,
    #[serde(rename = "TVName")]
    pub tv_name: String,
    pub tags: String,
    #[serde(rename = "GameID")]
    pub game_id: u64,
}

impl Default for SourceServerInfo {
    fn default() -> Self {
        Self {
            delay: -1,
            protocol: 0,
            name: NOT_AVAILABLE.into(),
            map: NOT_AVAILABLE.into(),
            folder: Default::default(),
            game: Default::default(),
            app_id: 0,
            players: 0,
            max_players: 0,
            bots: 0,
            server_type: Default::default(),
            environment: Default::default(),
            visibility: false,
            vac: false,
            version: Default::default(),
            port: 0,
            steam_id: 0,
            tv_port: 0,
            tv_name: Default::default(),
            tags: Default::default(),
            game_id: 0,
        }
    }
}

impl SourceServerInfo {
    pub fn is_online(&self) -> bool {
        self.delay >= 0
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Player {
    pub index: u8,
    pub name: String,
    pub score: i32,
    /// Connection time as `HH:MM:SS`.
    pub time: String,
    pub seconds: f32,
}

/// A2S_PLAYER result, empty when the query failed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SourceServerPlayers {
    pub total: u8,
    pub players: Vec<Player>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Rule {
    pub convar: String,
    pub value: String,
}

/// A2S_RULES result, empty when the query failed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SourceServerRules {
    pub total: u16,
    pub rules: Vec<Rule>,
}
