use crate::{
    cursor::ByteCursor,
    models::{Rule, SourceServerRules},
    protocols::{
        helpers::{make_request_packet, NO_CHALLENGE},
        models::Query,
    },
};

const REQUEST_KIND: u8 = b'V';

/// A2S_RULES
#[derive(Debug)]
pub struct RulesQuery;

impl Query for RulesQuery {
    type Output = SourceServerRules;

    const NAME: &'static str = "A2S_RULES";
    const RESPONSE_HEADER: char = 'E';
    const CHALLENGE_OPTIONAL: bool = false;

    fn make_request(challenge: Option<&[u8]>) -> Vec<u8> {
        make_request_packet(REQUEST_KIND, &[], challenge.unwrap_or(&NO_CHALLENGE))
    }

    fn parse_response(data: &mut ByteCursor) -> SourceServerRules {
        let total = data.short();
        let mut rules = Vec::with_capacity(usize::from(total));
        while !data.is_empty() {
            rules.push(Rule {
                convar: data.string(None),
                value: data.string(None),
            });
        }

        SourceServerRules { total, rules }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_request() {
        assert_eq!(
            RulesQuery::make_request(None),
            vec![0xFF, 0xFF, 0xFF, 0xFF, 0x56, 0xFF, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn test_parse_response() {
        let data = [
            &2u16.to_le_bytes()[..],
            b"mp_friendlyfire\0",
            b"1\0",
            b"sv_gravity\0",
            b"800\0",
        ]
        .concat();
        let expectation = SourceServerRules {
            total: 2,
            rules: vec![
                Rule {
                    convar: "mp_friendlyfire".into(),
                    value: "1".into(),
                },
                Rule {
                    convar: "sv_gravity".into(),
                    value: "800".into(),
                },
            ],
        };

        let result = RulesQuery::parse_response(&mut ByteCursor::new(data));

        assert_eq!(expectation, result);
    }
}
