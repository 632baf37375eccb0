//! Card reference link for the external browser.

use url::Url;

/// Search endpoint the detail view links to.
pub const CARD_SEARCH_URL: &str = "https://scryfall.com/search";

/// Search URL for `card_name`, with the name form-encoded into `q`.
pub fn card_lookup_url(card_name: &str) -> Url {
    let mut url = Url::parse(CARD_SEARCH_URL).expect("CARD_SEARCH_URL is a valid URL");
    url.query_pairs_mut().append_pair("q", card_name);
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name() {
        assert_eq!(
            card_lookup_url("Llanowar Elves").as_str(),
            "https://scryfall.com/search?q=Llanowar+Elves"
        );
    }

    #[test]
    fn test_reserved_characters_are_encoded() {
        let url = card_lookup_url("Fire // Ice & Co?");
        assert_eq!(
            url.as_str(),
            "https://scryfall.com/search?q=Fire+%2F%2F+Ice+%26+Co%3F"
        );
        let (key, value) = url.query_pairs().next().unwrap();
        assert_eq!(key, "q");
        assert_eq!(value, "Fire // Ice & Co?");
    }

    #[test]
    fn test_non_ascii_name() {
        let url = card_lookup_url("Lim-Dûl the Necromancer");
        assert!(url.as_str().contains("Lim-D%C3%BBl"));
    }
}
