use inject_abstractions::Injectable;
use inject_macros::Injectable;
use std::sync::Arc;

#[derive(Injectable)]
struct Config;

#[derive(Injectable)]
struct Pair(Arc<Config>, Arc<Config>);

fn main() {
    assert_eq!(Pair::type_descriptor().constructors()[0].parameters().len(), 2);
    assert!(Config::type_descriptor().constructors()[0].parameters().is_empty());
}
