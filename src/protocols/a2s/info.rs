use crate::{
    cursor::ByteCursor,
    models::{Environment, ServerType, SourceServerInfo},
    protocols::{helpers::make_request_packet, models::Query},
};

const REQUEST_KIND: u8 = b'T';
const REQUEST_BODY: &[u8] = b"Source Engine Query\0";

// Extra data flags
const EDF_PORT: u8 = 0x80;
const EDF_STEAM_ID: u8 = 0x10;
const EDF_SOURCE_TV: u8 = 0x40;
const EDF_TAGS: u8 = 0x20;
const EDF_GAME_ID: u8 = 0x01;

/// A2S_INFO
#[derive(Debug)]
pub struct InfoQuery;

impl Query for InfoQuery {
    type Output = SourceServerInfo;

    const NAME: &'static str = "A2S_INFO";
    const RESPONSE_HEADER: char = 'I';
    const CHALLENGE_OPTIONAL: bool = true;

    fn make_request(challenge: Option<&[u8]>) -> Vec<u8> {
        make_request_packet(REQUEST_KIND, REQUEST_BODY, challenge.unwrap_or_default())
    }

    fn parse_response(data: &mut ByteCursor) -> SourceServerInfo {
        let mut info = SourceServerInfo {
            protocol: data.byte(),
            name: data.string(None),
            map: data.string(None),
            folder: data.string(None),
            game: data.string(None),
            app_id: data.short(),
            players: data.byte(),
            max_players: data.byte(),
            bots: data.byte(),
            server_type: ServerType::from_code(data.byte()),
            environment: Environment::from_code(data.byte()),
            visibility: data.bool(),
            vac: data.bool(),
            version: data.string(None),
            ..Default::default()
        };

        let flags = data.byte();
        if flags & EDF_PORT != 0 {
            info.port = data.short();
        }
        if flags & EDF_STEAM_ID != 0 {
            info.steam_id = data.long();
        }
        if flags & EDF_SOURCE_TV != 0 {
            info.tv_port = data.short();
            info.tv_name = data.string(None);
        }
        if flags & EDF_TAGS != 0 {
            info.tags = data.string(None);
        }
        if flags & EDF_GAME_ID != 0 {
            info.game_id = data.long();
        }

        info
    }
}
