use rand::seq::SliceRandom;
use rand::Rng;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, CONNECTION, DNT, USER_AGENT,
};

pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:89.0) Gecko/20100101 Firefox/89.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.1.1 Safari/605.1.15",
];

const ACCEPT_VALUE: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.5";
const ACCEPT_ENCODING_VALUE: &str = "gzip, deflate, br";

/// Browser-like request headers with a user agent drawn from a fixed pool.
#[derive(Debug, Clone)]
pub struct HeaderRandomizer {
    user_agents: Vec<String>,
}

impl HeaderRandomizer {
    pub fn new() -> Self {
        Self::with_user_agents(USER_AGENTS.iter().map(|ua| ua.to_string()).collect())
    }

    /// An empty pool falls back to the built-in one.
    pub fn with_user_agents(user_agents: Vec<String>) -> Self {
        if user_agents.is_empty() {
            return Self::new();
        }
        Self { user_agents }
    }

    pub fn user_agents(&self) -> &[String] {
        &self.user_agents
    }

    pub fn pick_user_agent<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        self.user_agents
            .choose(rng)
            .map(String::as_str)
            .unwrap_or(USER_AGENTS[0])
    }

    pub fn headers<R: Rng + ?Sized>(&self, rng: &mut R) -> HeaderMap {
        let user_agent = self.pick_user_agent(rng);

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static(USER_AGENTS[0])),
        );
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static(ACCEPT_ENCODING_VALUE));
        headers.insert(DNT, HeaderValue::from_static("1"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        headers
    }
}

impl Default for HeaderRandomizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pool_has_at_least_three_agents() {
        assert!(HeaderRandomizer::new().user_agents().len() >= 3);
    }

    #[test]
    fn test_same_seed_same_agent() {
        let randomizer = HeaderRandomizer::new();
        let first = randomizer
            .pick_user_agent(&mut StdRng::seed_from_u64(7))
            .to_string();
        let second = randomizer
            .pick_user_agent(&mut StdRng::seed_from_u64(7))
            .to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn test_agent_comes_from_pool() {
        let randomizer = HeaderRandomizer::new();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let ua = randomizer.pick_user_agent(&mut rng);
            assert!(USER_AGENTS.contains(&ua));
        }
    }

    #[test]
    fn test_headers_contain_browser_fields() {
        let headers = HeaderRandomizer::new().headers(&mut StdRng::seed_from_u64(1));

        assert!(headers.contains_key(USER_AGENT));
        assert_eq!(headers[ACCEPT], ACCEPT_VALUE);
        assert_eq!(headers[ACCEPT_LANGUAGE], "en-US,en;q=0.5");
        assert_eq!(headers[ACCEPT_ENCODING], "gzip, deflate, br");
        assert_eq!(headers[DNT], "1");
        assert_eq!(headers[CONNECTION], "keep-alive");
    }

    #[test]
    fn test_custom_pool() {
        let randomizer = HeaderRandomizer::with_user_agents(vec!["TestAgent/1.0".to_string()]);
        let headers = randomizer.headers(&mut StdRng::seed_from_u64(3));
        assert_eq!(headers[USER_AGENT], "TestAgent/1.0");
    }

    #[test]
    fn test_empty_pool_falls_back() {
        let randomizer = HeaderRandomizer::with_user_agents(Vec::new());
        assert_eq!(randomizer.user_agents().len(), USER_AGENTS.len());
    }
}
