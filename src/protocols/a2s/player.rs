use crate::{
    cursor::ByteCursor,
    models::{Player, SourceServerPlayers},
    protocols::{
        helpers::{make_request_packet, NO_CHALLENGE},
        models::Query,
    },
    util::format_seconds,
};

const REQUEST_KIND: u8 = b'U';

/// A2S_PLAYER
#[derive(Debug)]
pub struct PlayerQuery;

impl Query for PlayerQuery {
    type Output = SourceServerPlayers;

    const NAME: &'static str = "A2S_PLAYER";
    const RESPONSE_HEADER: char = 'D';
    const CHALLENGE_OPTIONAL: bool = false;

    fn make_request(challenge: Option<&[u8]>) -> Vec<u8> {
        make_request_packet(REQUEST_KIND, &[], challenge.unwrap_or(&NO_CHALLENGE))
    }

    fn parse_response(data: &mut ByteCursor) -> SourceServerPlayers {
        let total = data.byte();
        let mut players = Vec::with_capacity(usize::from(total));
        while !data.is_empty() {
            let index = data.byte();
            let name = data.string(None);
            let score = data.int();
            let seconds = data.float();
            players.push(Player {
                index,
                name,
                score,
                time: format_seconds(f64::from(seconds)),
                seconds,
            });
        }

        SourceServerPlayers { total, players }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_request() {
        assert_eq!(
            PlayerQuery::make_request(None),
            vec![0xFF, 0xFF, 0xFF, 0xFF, 0x55, 0xFF, 0xFF, 0xFF, 0xFF]
        );
        assert_eq!(
            PlayerQuery::make_request(Some(&[0x4B, 0xA1, 0x33, 0x07][..])),
            vec![0xFF, 0xFF, 0xFF, 0xFF, 0x55, 0x4B, 0xA1, 0x33, 0x07]
        );
    }

    #[test]
    fn test_parse_response() {
        let data = [
            &[2, 0][..],
            b"alice\0",
            &12i32.to_le_bytes(),
            &3661.5f32.to_le_bytes(),
            &[1],
            b"bob\0",
            &(-3i32).to_le_bytes(),
            &59.25f32.to_le_bytes(),
        ]
        .concat();
        let expectation = SourceServerPlayers {
            total: 2,
            players: vec![
                Player {
                    index: 0,
                    name: "alice".into(),
                    score: 12,
                    time: "01:01:01".into(),
                    seconds: 3661.5,
                },
                Player {
                    index: 1,
                    name: "bob".into(),
                    score: -3,
                    time: "00:00:59".into(),
                    seconds: 59.25,
                },
            ],
        };

        let result = PlayerQuery::parse_response(&mut ByteCursor::new(data));

        assert_eq!(expectation, result);
    }

    #[test]
    fn empty_server() {
        let result = PlayerQuery::parse_response(&mut ByteCursor::new(vec![0]));

        assert_eq!(result, SourceServerPlayers::default());
    }

    #[test]
    fn truncated_entry() {
        let data = [&[1, 0][..], b"carol"].concat();

        let result = PlayerQuery::parse_response(&mut ByteCursor::new(data));

        assert_eq!(result.players.len(), 1);
        assert_eq!(result.players[0].name, "carol");
        assert_eq!(result.players[0].score, 0);
        assert_eq!(result.players[0].time, "00:00:00");
    }
}
