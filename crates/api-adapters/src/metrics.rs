//! Forum activity counters in Prometheus text format.

use prometheus_client::encoding::text::encode;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::registry::Registry;

pub struct Metrics {
    registry: Registry,
    pub registrations: Counter,
    pub logins_succeeded: Counter,
    pub logins_failed: Counter,
    pub posts_created: Counter,
    pub posts_updated: Counter,
    pub posts_deleted: Counter,
    pub comments_created: Counter,
}

impl Metrics {
    pub fn new() -> Self {
        let mut registry = Registry::with_prefix("gamehub");
        let register = |registry: &mut Registry, name: &str, help: &str| {
            let counter: Counter = Counter::default();
            registry.register(name, help, counter.clone());
            counter
        };

        Self {
            registrations: register(&mut registry, "registrations", "Accounts created"),
            logins_succeeded: register(&mut registry, "logins_succeeded", "Successful logins"),
            logins_failed: register(&mut registry, "logins_failed", "Rejected logins"),
            posts_created: register(&mut registry, "posts_created", "Posts created"),
            posts_updated: register(&mut registry, "posts_updated", "Posts edited"),
            posts_deleted: register(&mut registry, "posts_deleted", "Posts deleted"),
            comments_created: register(&mut registry, "comments_created", "Comments added"),
            registry,
        }
    }

    pub fn render(&self) -> Result<String, std::fmt::Error> {
        let mut body = String::new();
        encode(&mut body, &self.registry)?;
        Ok(body)
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
