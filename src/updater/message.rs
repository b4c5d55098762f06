use crate::constants::{
    SERVER_MESSAGE_DESCRIPTION_FIELD, SERVER_MESSAGE_FIRST_PAIR_FIELD, SERVER_MESSAGE_SEPARATOR,
};

/// A decoded version-server response.
///
/// The wire format is a single `|`-separated record. Field 1 carries the
/// release description; fields 0, 2 and 3 are unused; from field 4 onward the
/// fields form `key|value` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerMessage {
    pub description: String,
    pub entries: Vec<(String, String)>,
}

/// Splits a raw server response into its description and key/value entries.
///
/// Returns `None` for an empty body. An unpaired trailing field is ignored.
pub fn parse_server_message(raw: &str) -> Option<ServerMessage> {
    if raw.is_empty() {
        return None;
    }

    let fields: Vec<&str> = raw.split(SERVER_MESSAGE_SEPARATOR).collect();
    let description = fields
        .get(SERVER_MESSAGE_DESCRIPTION_FIELD)
        .map(|s| s.to_string())
        .unwrap_or_default();

    let entries = fields
        .get(SERVER_MESSAGE_FIRST_PAIR_FIELD..)
        .unwrap_or_default()
        .chunks_exact(2)
        .map(|pair| (pair[0].to_string(), pair[1].to_string()))
        .collect();

    Some(ServerMessage {
        description,
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn test_full_message() {
        let message =
            parse_server_message("x|desc|x|x|VERSION:branch|1.2.3|VERSION:beta|1.3.0-beta")
                .unwrap();
        assert_eq!(message.description, "desc");
        assert_eq!(
            message.entries,
            vec![
                entry("VERSION:branch", "1.2.3"),
                entry("VERSION:beta", "1.3.0-beta")
            ]
        );
    }

    #[test]
    fn test_unpaired_trailing_field_is_ignored() {
        let message = parse_server_message("x|desc|x|x|URL:changelog|http://a|VERSION:branch")
            .unwrap();
        assert_eq!(message.entries, vec![entry("URL:changelog", "http://a")]);
    }

    #[test]
    fn test_short_messages() {
        assert_eq!(parse_server_message(""), None);

        let message = parse_server_message("only").unwrap();
        assert_eq!(message.description, "");
        assert!(message.entries.is_empty());

        let message = parse_server_message("x|desc|x|x").unwrap();
        assert_eq!(message.description, "desc");
        assert!(message.entries.is_empty());
    }

    #[test]
    fn test_empty_values_are_kept() {
        let message = parse_server_message("x||x|x|URL:tags|").unwrap();
        assert_eq!(message.description, "");
        assert_eq!(message.entries, vec![entry("URL:tags", "")]);
    }
}
