pub mod handler;
pub mod rules;

pub use handler::handle_proxy;
pub use rules::{ProxyRule, ProxyRules};
